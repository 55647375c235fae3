use lapse::cli::run;
use lapse::parse::ParseError;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        if e.downcast_ref::<ParseError>().is_some() {
            // User error
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }

        eprintln!("Internal error: {}", e);
        let mut causes = e.chain().skip(1).peekable();
        if causes.peek().is_some() {
            eprintln!("\nCaused by:");
            for (indent, err) in causes.enumerate() {
                eprintln!("{:indent$}  {}", "", err, indent = indent + 1);
            }
        }
        std::process::exit(2);
    }
}
