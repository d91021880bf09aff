//! List the available twists

use anyhow::Result;
use clap::Parser;
use standup_core::Twist;

#[derive(Parser, Debug)]
pub struct TwistsArgs {
    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run_twists(args: TwistsArgs) -> Result<()> {
    if args.json {
        let twists: Vec<_> = Twist::ALL
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "id": t.id(),
                    "name": t.label(),
                    "description": t.description(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&twists)?);
        return Ok(());
    }

    for twist in Twist::ALL {
        println!("{:<12} {}  {}", twist.id(), twist.label(), twist.description());
    }
    Ok(())
}
