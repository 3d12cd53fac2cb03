//! Mob classification.
//!
//! Maps interpreted facts to community labels. Two orthogonal taxonomies:
//! behavior-based mobs from the activity/location/mood facts, and
//! product-based mobs from the milk type. The behavior rules are an
//! explicit ordered list evaluated top to bottom, so precedence is visible
//! and testable.

use milkmob_models::{AnalysisFacts, MilkType, MobAssignment};

/// One behavior rule: first predicate to match assigns the mob.
struct MobRule {
    name: &'static str,
    description: &'static str,
    matches: fn(&AnalysisFacts) -> bool,
}

/// Behavior rules in precedence order.
const BEHAVIOR_RULES: &[MobRule] = &[
    MobRule {
        name: "Gym Warriors",
        description: "Post-workout milk as the recovery drink of choice",
        matches: |f| f.activity == "fitness" || f.location == "gym",
    },
    MobRule {
        name: "Comedy Kings",
        description: "Milk content played for laughs",
        matches: |f| f.mood == "funny",
    },
    MobRule {
        name: "Creative Collective",
        description: "Artistic and choreographed milk moments",
        matches: |f| f.mood == "artistic" || f.location == "studio" || f.activity == "dancing",
    },
    MobRule {
        name: "Adventure Squad",
        description: "Milk out in the wild",
        matches: |f| f.location == "outdoors",
    },
    MobRule {
        name: "Home Chillers",
        description: "Low-key milk enjoyment at home",
        matches: |f| (f.location == "home" || f.location == "bedroom") && f.mood == "chill",
    },
    MobRule {
        name: "Kitchen Creators",
        description: "Milk as an ingredient and a co-star",
        matches: |f| f.location == "kitchen" && f.activity == "cooking",
    },
];

const DEFAULT_MOB: (&str, &str) = ("Milk Enthusiasts", "Pure milk appreciation");

/// Product-based mob from the milk type.
fn milk_mob(milk_type: MilkType) -> &'static str {
    match milk_type {
        MilkType::Chocolate => "Chocolate Champions",
        MilkType::Strawberry => "Berry Squad",
        MilkType::Regular | MilkType::Unknown => "Classic Crew",
    }
}

/// Classify facts into a mob assignment. Total and deterministic.
pub fn classify(facts: &AnalysisFacts) -> MobAssignment {
    let (name, description) = BEHAVIOR_RULES
        .iter()
        .find(|rule| (rule.matches)(facts))
        .map(|rule| (rule.name, rule.description))
        .unwrap_or(DEFAULT_MOB);

    MobAssignment {
        name: name.to_string(),
        description: description.to_string(),
        milk_mob: milk_mob(facts.milk_type).to_string(),
    }
}
