//! Twist transformations over a speaking order
//!
//! Every spin shuffles the present members and then applies one of five
//! named twists. The random source is injected so callers (and tests) can
//! seed it.

use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::member::{Member, PAIR_EMOJI};

/// Named transformation applied to a shuffled order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Twist {
    /// Plain shuffle, no twist
    #[default]
    Random,
    /// Reverse alphabetical order
    Reverse,
    /// Shuffle and leave one person out
    RandomSkip,
    /// Shuffle and let one person speak twice
    DoubleTurn,
    /// Shuffle and pair adjacent people into shared turns
    PairUp,
}

impl Twist {
    /// All twists in display order
    pub const ALL: [Twist; 5] = [
        Twist::Random,
        Twist::Reverse,
        Twist::RandomSkip,
        Twist::DoubleTurn,
        Twist::PairUp,
    ];

    /// Wire id, as accepted by `FromStr` and stored with recorded spins.
    pub fn id(self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Reverse => "reverse",
            Self::RandomSkip => "random_skip",
            Self::DoubleTurn => "double_turn",
            Self::PairUp => "pair_up",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Random => "🎲 Random Shuffle",
            Self::Reverse => "🔄 Reverse Alpha",
            Self::RandomSkip => "⏭️ Random Skip",
            Self::DoubleTurn => "🔁 Double Turn",
            Self::PairUp => "👥 Pair Up",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Random => "Completely random order",
            Self::Reverse => "Reverse alphabetical order",
            Self::RandomSkip => "One random person sits this one out",
            Self::DoubleTurn => "One lucky person goes twice",
            Self::PairUp => "Adjacent people share a turn",
        }
    }
}

impl fmt::Display for Twist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Twist {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Twist::ALL
            .into_iter()
            .find(|t| t.id() == s.trim())
            .ok_or_else(|| CoreError::UnknownTwist(s.to_owned()))
    }
}

/// One speaking turn. Paired turns carry two member ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    /// 1-indexed position in the order
    pub position: u32,
    pub name: String,
    pub emoji: String,
    pub member_ids: Vec<i64>,
}

/// Result of applying a twist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TwistOutcome {
    pub slots: Vec<Slot>,
    /// False when the twist degraded to a plain order (e.g. too few members)
    pub applied: bool,
    pub description: String,
}

impl TwistOutcome {
    /// Member ids in speaking order, one entry per appearance.
    pub fn member_ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.slots.iter().flat_map(|s| s.member_ids.iter().copied())
    }
}

/// Shuffle `members` and apply `twist`.
pub fn apply_twist<R: Rng + ?Sized>(
    mut members: Vec<Member>,
    twist: Twist,
    rng: &mut R,
) -> TwistOutcome {
    match twist {
        Twist::Random => {
            members.shuffle(rng);
            outcome(solo_slots(members), false, "Random order (no twist)")
        }
        Twist::Reverse => {
            members.sort_by(|a, b| {
                b.name
                    .to_lowercase()
                    .cmp(&a.name.to_lowercase())
                    .then(a.id.cmp(&b.id))
            });
            outcome(solo_slots(members), true, "Reversed alphabetical order")
        }
        Twist::RandomSkip => {
            if members.len() < 2 {
                return outcome(solo_slots(members), false, "Not enough members to skip");
            }
            members.shuffle(rng);
            let skipped = members.remove(rng.gen_range(0..members.len()));
            let description = format!("Skipped {}", skipped.name);
            outcome(solo_slots(members), true, description)
        }
        Twist::DoubleTurn => {
            members.shuffle(rng);
            let Some(lucky) = members.choose(rng).cloned() else {
                return outcome(Vec::new(), false, "No members available");
            };
            let description = format!("{} goes twice!", lucky.name);
            members.push(lucky);
            outcome(solo_slots(members), true, description)
        }
        Twist::PairUp => {
            members.shuffle(rng);
            let applied = members.len() >= 2;
            let slots = members
                .chunks(2)
                .map(|chunk| match chunk {
                    [a, b] => Slot {
                        position: 0,
                        name: format!("{} & {}", a.name, b.name),
                        emoji: PAIR_EMOJI.to_owned(),
                        member_ids: vec![a.id, b.id],
                    },
                    [solo] => solo_slot(solo.clone()),
                    _ => unreachable!("chunks(2) yields one or two items"),
                })
                .collect();
            let description = if applied {
                "Members paired up!"
            } else {
                "Not enough members to pair"
            };
            outcome(slots, applied, description)
        }
    }
}

fn solo_slot(member: Member) -> Slot {
    Slot {
        position: 0,
        name: member.name,
        emoji: member.emoji,
        member_ids: vec![member.id],
    }
}

fn solo_slots(members: Vec<Member>) -> Vec<Slot> {
    members.into_iter().map(solo_slot).collect()
}

fn outcome(mut slots: Vec<Slot>, applied: bool, description: impl Into<String>) -> TwistOutcome {
    for (i, slot) in slots.iter_mut().enumerate() {
        slot.position = i as u32 + 1;
    }
    TwistOutcome {
        slots,
        applied,
        description: description.into(),
    }
}
