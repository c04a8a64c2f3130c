use clap::{Args, Parser, Subcommand};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

#[derive(Parser, Debug)]
#[command(name = "pharma-api")]
#[command(about = "client cli used to query the pharmacy orders server", version, long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser, Debug)]
enum Commands {
    /// order related ops
    #[command(arg_required_else_help = true)]
    Orders(OrdersArgs),
}

#[derive(Debug, Args)]
pub(crate) struct OrdersArgs {
    #[command(subcommand)]
    command: OrderCmds,
}

#[derive(Debug, Subcommand)]
enum OrderCmds {
    List {
        #[arg(long, help = "Filter by pharmacy id, case-insensitive.")]
        pharmacy_id: Option<String>,
        #[arg(long, help = "Comma-separated status names to match.")]
        status: Option<String>,
        #[arg(long, help = "Inclusive lower creation-time bound, RFC 3339.")]
        from: Option<String>,
        #[arg(long, help = "Inclusive upper creation-time bound, RFC 3339.")]
        to: Option<String>,
        #[arg(long, help = "Sort field, createdAt or totalCents.", default_value = "createdAt")]
        sort: String,
        #[arg(long, help = "Sort direction, asc or desc.", default_value = "desc")]
        dir: String,
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(i64).range(1..))]
        page: i64,
        #[arg(long, default_value_t = 20)]
        page_size: i64,
    },
}

const HOST: &str = "http://localhost:8080";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GetOrdersResponse {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub items: Vec<serde_json::Value>,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let args = Cli::parse();

    match args.command {
        Commands::Orders(orders) => match orders.command {
            OrderCmds::List {
                pharmacy_id,
                status,
                from,
                to,
                sort,
                dir,
                page,
                page_size,
            } => {
                let mut query = vec![
                    ("sort", sort),
                    ("dir", dir),
                    ("page", page.to_string()),
                    ("pageSize", page_size.to_string()),
                ];
                if let Some(pharmacy_id) = pharmacy_id {
                    query.push(("pharmacyId", pharmacy_id));
                }
                if let Some(status) = status {
                    query.push(("status", status));
                }
                if let Some(from) = from {
                    query.push(("from", from));
                }
                if let Some(to) = to {
                    query.push(("to", to));
                }
                let res = Client::new()
                    .get(format!("{}/{}", HOST, "v1/orders"))
                    .query(&query)
                    .send()
                    .await?;
                match res.status() {
                    StatusCode::OK => {
                        let res = res
                            .json::<GetOrdersResponse>()
                            .await
                            .expect("failed to get response, aborting");
                        println!(
                            "page {} (size {}), {} orders returned",
                            res.page, res.page_size, res.total
                        );
                        for item in res.items {
                            println!("{}", item);
                        }
                    }
                    StatusCode::BAD_REQUEST => {
                        println!("invalid query: {}", res.text().await?);
                    }
                    unexpected => {
                        println!("got unexpected status code, {}", unexpected);
                    }
                }
            }
        },
    };
    Ok(())
}
