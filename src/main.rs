fn main() {
    if let Err(error) = asinpack::run() {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}
