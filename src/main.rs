//! addr-filter CLI entry point.

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

/// Classify an address token and answer a query about it.
#[derive(Parser, Debug)]
#[command(name = addr_filter::PACKAGE)]
#[command(version)]
#[command(about = "Classify and query IP, CIDR, and MAC address tokens")]
#[command(
    long_about = "Classifies a token as an IP address, network, or hardware address and \
answers a query about it (type, netmask, broadcast, membership, dialect form, ...). \
Prints 'false' when the query does not apply."
)]
struct Args {
    /// The address token to classify.
    value: String,

    /// Query keyword, or a network literal for a membership test.
    #[arg(default_value = "")]
    query: String,

    /// Which filter to apply.
    #[arg(short, long, value_enum, default_value = "ipaddr")]
    filter: FilterKind,

    /// Emit the result as JSON instead of plain text.
    #[arg(long)]
    json: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FilterKind {
    Ipaddr,
    Ipv4,
    Ipv6,
    Hwaddr,
    Macaddr,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let result = match args.filter {
        FilterKind::Ipaddr => addr_filter::ipaddr(&args.value, &args.query),
        FilterKind::Ipv4 => addr_filter::ipv4(&args.value, &args.query),
        FilterKind::Ipv6 => addr_filter::ipv6(&args.value, &args.query),
        FilterKind::Hwaddr => addr_filter::hwaddr(&args.value, &args.query),
        FilterKind::Macaddr => addr_filter::macaddr(&args.value, &args.query),
    };

    match result {
        Ok(value) => {
            if args.json {
                match serde_json::to_string(&value) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("failed to encode result: {}", e);
                        std::process::exit(1);
                    }
                }
            } else {
                println!("{}", value);
            }
        }
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}
