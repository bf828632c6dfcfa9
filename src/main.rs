use clap::Parser;
use compcalc::api::{Cli, Command, run_http_server, run_project_command};

#[tokio::main]
async fn main() {
    compcalc::init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Serve { port } => {
            if let Err(e) = run_http_server(port).await {
                tracing::error!("server error: {e}");
                std::process::exit(1);
            }
        }
        Command::Project(args) => match run_project_command(&args) {
            Ok(output) => print!("{output}"),
            Err(e) => {
                tracing::error!("{e}");
                std::process::exit(1);
            }
        },
    }
}
