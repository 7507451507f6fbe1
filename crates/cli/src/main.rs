fn main() {
    if let Err(e) = pkgscan_cli::run() {
        eprintln!("pkgscan: {e}");
        std::process::exit(1);
    }
}
