mod cli;

fn main() {
    if let Err(e) = cli::run() {
        if !e.is_user_error() {
            tracing::error!(error = %e, "command failed");
        }
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
