//! resolve-entrypoint binary - thin wrapper over the shared CLI implementation

use console::style;

fn main() {
    let code = match entrypoint_resolver::run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {err:#}", style("Error:").red().bold());
            1
        }
    };
    std::process::exit(code);
}
