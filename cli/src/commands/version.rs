//! Version command

/// Run the version command.
pub fn run() {
    println!("aks-node-controller {}", env!("CARGO_PKG_VERSION"));
}
