//! Offline spin: shuffle names given on the command line, no server needed

use anyhow::{bail, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use standup_core::{apply_twist, Member, Twist, DEFAULT_EMOJI};

#[derive(Parser, Debug)]
pub struct SpinArgs {
    /// Names of the people present
    #[arg(required = true)]
    pub names: Vec<String>,

    /// Twist to apply (see `standup twists`)
    #[arg(long, short = 't', default_value = "random")]
    pub twist: Twist,

    /// Seed the shuffle for a reproducible order
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run_spin(args: SpinArgs) -> Result<()> {
    let members: Vec<Member> = args
        .names
        .iter()
        .map(|n| n.trim())
        .filter(|n| !n.is_empty())
        .enumerate()
        .map(|(i, name)| Member::new(i as i64 + 1, name, DEFAULT_EMOJI))
        .collect();
    if members.is_empty() {
        bail!("no names given");
    }

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let outcome = apply_twist(members, args.twist, &mut rng);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    for slot in &outcome.slots {
        println!("{:>2}. {} {}", slot.position, slot.emoji, slot.name);
    }
    if outcome.applied {
        println!("\n✨ Twist applied: {}", outcome.description);
    }
    Ok(())
}
