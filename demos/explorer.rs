//! Example: a line-oriented explorer driven by the `panel` command loop.
//!
//! Run with: cargo run --example explorer -- [base-url]
//!
//! Then type commands such as `creator eosio.token`, `block 1000`, `info`,
//! `health`, `voters eosnationftw` or `proposals eosio`. An empty line exits.
//! Set `RUST_LOG=hyperion_client=debug` to see the requests.

use hyperion_client::HyperionClient;
use hyperion_client::panel::{Command, ViewState, dispatch};
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let client = match std::env::args().nth(1) {
        Some(url) => HyperionClient::new(url),
        None => HyperionClient::eos_mainnet(),
    };
    println!("connected to {}", client.base_url());

    let mut view = ViewState::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 || line.trim().is_empty() {
            break;
        }
        let command: Command = match line.parse() {
            Ok(command) => command,
            Err(error) => {
                println!("{error}");
                continue;
            }
        };

        view.begin(&command);
        let outcome = dispatch(&client, command).await;
        view.update(outcome);

        println!("[{}]", view.title);
        match &view.error {
            Some(error) => println!("error: {error}"),
            None => view.lines.iter().for_each(|line| println!("  {line}")),
        }
    }
    Ok(())
}
