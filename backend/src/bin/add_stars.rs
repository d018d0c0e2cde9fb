//! Administrative client crediting stars to a handle.
//!
//! ```text
//! STARLEDGER_BOT_TOKEN=… STARLEDGER_ADMIN_PASSWORD=… \
//!     add-stars --server http://localhost:3000 --uid8 00042017 --amount 25
//! ```

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr, eyre};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use starledger::domain::{Handle, StarAmount};

#[derive(Parser)]
#[command(name = "add-stars", about = "Credit stars to an exchange handle")]
struct Cli {
    /// Base URL of the ledger server.
    #[arg(long, default_value = "http://127.0.0.1:3000")]
    server: String,
    /// Eight-digit handle to credit.
    #[arg(long, value_parser = parse_handle)]
    uid8: Handle,
    /// Positive number of stars to add.
    #[arg(long, value_parser = parse_amount)]
    amount: StarAmount,
    /// Shared bot token.
    #[arg(long, env = "STARLEDGER_BOT_TOKEN", hide_env_values = true)]
    bot_token: String,
    /// Shared admin password.
    #[arg(long, env = "STARLEDGER_ADMIN_PASSWORD", hide_env_values = true)]
    password: String,
}

fn parse_handle(raw: &str) -> Result<Handle, String> {
    Handle::parse(raw).map_err(|err| err.to_string())
}

fn parse_amount(raw: &str) -> Result<StarAmount, String> {
    StarAmount::parse_decimal(raw).map_err(|err| err.to_string())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AddStarsBody<'a> {
    bot_token: &'a str,
    password: &'a str,
    uid8: &'a str,
    amount: i64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddStarsReply {
    uid8: String,
    added: i64,
    new_balance: i64,
}

#[derive(Deserialize)]
struct ErrorReply {
    code: String,
    message: String,
}

fn endpoint(server: &str) -> String {
    format!("{}/api/cli/add-stars", server.trim_end_matches('/'))
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let bot_token = Zeroizing::new(cli.bot_token);
    let password = Zeroizing::new(cli.password);

    let body = AddStarsBody {
        bot_token: &bot_token,
        password: &password,
        uid8: cli.uid8.as_str(),
        amount: cli.amount.get(),
    };
    let url = endpoint(&cli.server);
    let response = reqwest::Client::new()
        .post(&url)
        .json(&body)
        .send()
        .await
        .wrap_err_with(|| format!("request to {url} failed"))?;

    let status = response.status();
    if !status.is_success() {
        let error: ErrorReply = response
            .json()
            .await
            .wrap_err_with(|| format!("server answered {status} without an error body"))?;
        return Err(eyre!("{status} {}: {}", error.code, error.message));
    }

    let reply: AddStarsReply = response
        .json()
        .await
        .wrap_err("unexpected response body")?;
    println!(
        "added {} stars to {}; new balance {}",
        reply.added, reply.uid8, reply.new_balance
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("http://localhost:3000", "http://localhost:3000/api/cli/add-stars")]
    #[case("http://localhost:3000/", "http://localhost:3000/api/cli/add-stars")]
    fn endpoint_joins_the_path(#[case] server: &str, #[case] expected: &str) {
        assert_eq!(endpoint(server), expected);
    }

    #[rstest]
    fn arguments_are_validated_before_sending() {
        let parsed = Cli::try_parse_from([
            "add-stars",
            "--uid8",
            "1234",
            "--amount",
            "5",
            "--bot-token",
            "t",
            "--password",
            "p",
        ]);
        assert!(parsed.is_err());

        let parsed = Cli::try_parse_from([
            "add-stars",
            "--uid8",
            "00042017",
            "--amount",
            "0",
            "--bot-token",
            "t",
            "--password",
            "p",
        ]);
        assert!(parsed.is_err());
    }

    #[rstest]
    fn body_uses_the_wire_field_names() {
        let body = AddStarsBody {
            bot_token: "t",
            password: "p",
            uid8: "00042017",
            amount: 25,
        };
        assert_eq!(
            serde_json::to_value(&body).expect("serialise"),
            serde_json::json!({
                "botToken": "t",
                "password": "p",
                "uid8": "00042017",
                "amount": 25
            })
        );
    }
}
