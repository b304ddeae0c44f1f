fn main() {
    if let Err(e) = ahon_cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
