use component_inspector::cli::exit_code;
use component_inspector::{Cli, cmd_inspect};

fn main() {
    let cli = match Cli::from_env() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            std::process::exit(exit_code(&e));
        }
    };
    std::process::exit(cmd_inspect(cli));
}
