//! Subcommand arguments and handlers

use anyhow::{Context, Result};
use build_core::catalog::query::{
    parse_flag, ArmorQuery, BuildQuery, ItemQuery, MonsterQuery, OrderBy, RarityRange, SkillQuery,
    WeaponQuery,
};
use build_core::recommend::RecommendationSummary;
use build_core::{
    compute_build_stats, recommend_build, ArmorType, BuildId, BuildStatsEngine, BuildStatsReport,
    Catalog, ScoringWeights,
};
use clap::{Args, Subcommand};
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Saved build id
    pub build_id: i64,
}

impl StatsArgs {
    pub fn execute(&self, catalog: &Catalog) -> Result<Value> {
        let report = compute_build_stats(catalog, BuildId(self.build_id))?;
        info!(
            build = self.build_id,
            skills = report.skills.len(),
            "stats computed"
        );
        Ok(serde_json::to_value(report)?)
    }
}

#[derive(Args, Debug)]
pub struct RecommendArgs {
    /// Monster name (exact match)
    pub monster: String,

    /// Scoring weights file (TOML)
    #[arg(long, env = "MHW_WEIGHTS")]
    pub weights: Option<PathBuf>,

    /// Also compute the stats report of the recommended loadout
    #[arg(long)]
    pub stats: bool,
}

#[derive(Serialize)]
struct RecommendOutput {
    recommendation: RecommendationSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    stats: Option<BuildStatsReport>,
}

impl RecommendArgs {
    pub fn execute(&self, catalog: &Catalog) -> Result<Value> {
        let weights = match self.weights {
            Some(ref path) => ScoringWeights::load(path)
                .with_context(|| format!("loading weights {}", path.display()))?,
            None => ScoringWeights::default(),
        };

        let recommendation = recommend_build(catalog, &self.monster, &weights)?;
        info!(monster = %self.monster, "loadout recommended");

        let stats = self.stats.then(|| {
            BuildStatsEngine::new(catalog).compute_for_snapshot(&recommendation.to_snapshot(BuildId(0)))
        });

        Ok(serde_json::to_value(RecommendOutput {
            recommendation: recommendation.summary(),
            stats,
        })?)
    }
}

#[derive(Args, Debug, Default)]
pub struct RarityArgs {
    /// Exact rarity
    #[arg(long)]
    pub rarity: Option<i64>,

    #[arg(long)]
    pub min_rarity: Option<i64>,

    #[arg(long)]
    pub max_rarity: Option<i64>,
}

impl From<&RarityArgs> for RarityRange {
    fn from(args: &RarityArgs) -> Self {
        RarityRange {
            exact: args.rarity,
            min: args.min_rarity,
            max: args.max_rarity,
        }
    }
}

#[derive(Args, Debug)]
pub struct WeaponArgs {
    #[arg(long)]
    pub weapon_type: Option<String>,

    /// Element, case-insensitive
    #[arg(long)]
    pub element: Option<String>,

    /// Minimum raw attack
    #[arg(long)]
    pub min_attack: Option<i64>,

    #[command(flatten)]
    pub rarity: RarityArgs,

    /// Order field, `-field` for descending
    #[arg(long, default_value = "id", allow_hyphen_values = true)]
    pub order_by: String,
}

#[derive(Args, Debug)]
pub struct ArmorArgs {
    #[arg(long)]
    pub armor_type: Option<ArmorType>,

    /// Minimum base defense
    #[arg(long)]
    pub min_defense: Option<i64>,

    /// Substring of a granted skill's name
    #[arg(long)]
    pub has_skill: Option<String>,

    #[command(flatten)]
    pub rarity: RarityArgs,

    #[arg(long, default_value = "id", allow_hyphen_values = true)]
    pub order_by: String,
}

#[derive(Args, Debug)]
pub struct SkillArgs {
    /// Substring of the skill name
    #[arg(long)]
    pub name: Option<String>,

    /// Minimum max level
    #[arg(long)]
    pub min_level: Option<i64>,

    #[arg(long, default_value = "id", allow_hyphen_values = true)]
    pub order_by: String,
}

#[derive(Args, Debug)]
pub struct ItemArgs {
    /// Substring of the item name
    #[arg(long)]
    pub name: Option<String>,

    #[command(flatten)]
    pub rarity: RarityArgs,

    #[arg(long, default_value = "id", allow_hyphen_values = true)]
    pub order_by: String,
}

impl ItemArgs {
    fn query(&self) -> ItemQuery {
        ItemQuery {
            name: self.name.clone(),
            rarity: RarityRange::from(&self.rarity),
            order_by: OrderBy::parse(&self.order_by),
        }
    }
}

#[derive(Args, Debug)]
pub struct MonsterArgs {
    /// true/1/yes or false/0/no; other values are ignored
    #[arg(long)]
    pub is_elder_dragon: Option<String>,

    /// Element weakness, case-insensitive
    #[arg(long)]
    pub element: Option<String>,

    /// Minimum weakness stars (1-3), only with --element
    #[arg(long)]
    pub min_stars: Option<i64>,

    #[arg(long, default_value = "id", allow_hyphen_values = true)]
    pub order_by: String,
}

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Substring of the build name
    #[arg(long)]
    pub name: Option<String>,

    /// Weapon type of the build's weapon
    #[arg(long)]
    pub weapon_type: Option<String>,

    #[arg(long, default_value = "id", allow_hyphen_values = true)]
    pub order_by: String,
}

#[derive(Subcommand, Debug)]
pub enum ListCommand {
    Weapons(WeaponArgs),
    Armor(ArmorArgs),
    Skills(SkillArgs),
    Charms(ItemArgs),
    Decorations(ItemArgs),
    Monsters(MonsterArgs),
    Builds(BuildArgs),
}

impl ListCommand {
    pub fn execute(&self, catalog: &Catalog) -> Result<Value> {
        let value = match self {
            ListCommand::Weapons(args) => {
                let query = WeaponQuery {
                    weapon_type: args.weapon_type.clone(),
                    element: args.element.clone(),
                    rarity: RarityRange::from(&args.rarity),
                    min_attack: args.min_attack,
                    order_by: OrderBy::parse(&args.order_by),
                };
                serde_json::to_value(query.run(catalog))?
            }
            ListCommand::Armor(args) => {
                let query = ArmorQuery {
                    armor_type: args.armor_type,
                    rarity: RarityRange::from(&args.rarity),
                    min_defense: args.min_defense,
                    has_skill: args.has_skill.clone(),
                    order_by: OrderBy::parse(&args.order_by),
                };
                serde_json::to_value(query.run(catalog))?
            }
            ListCommand::Skills(args) => {
                let query = SkillQuery {
                    name: args.name.clone(),
                    min_level: args.min_level,
                    order_by: OrderBy::parse(&args.order_by),
                };
                serde_json::to_value(query.run(catalog))?
            }
            ListCommand::Charms(args) => serde_json::to_value(args.query().charms(catalog))?,
            ListCommand::Decorations(args) => {
                serde_json::to_value(args.query().decorations(catalog))?
            }
            ListCommand::Monsters(args) => {
                let query = MonsterQuery {
                    is_elder_dragon: args.is_elder_dragon.as_deref().and_then(parse_flag),
                    element: args.element.clone(),
                    min_stars: args.min_stars,
                    order_by: OrderBy::parse(&args.order_by),
                };
                serde_json::to_value(query.run(catalog))?
            }
            ListCommand::Builds(args) => {
                let query = BuildQuery {
                    name: args.name.clone(),
                    weapon_type: args.weapon_type.clone(),
                    order_by: OrderBy::parse(&args.order_by),
                };
                serde_json::to_value(query.run(catalog))?
            }
        };
        Ok(value)
    }
}
