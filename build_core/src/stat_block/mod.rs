//! Build stats - Aggregated weapon, defense, set bonus and skill stats for a build

mod aggregator;
mod report;
mod weapon;

pub use aggregator::{SkillAccumulator, SkillRow};
pub use report::{BuildStatsReport, StatsBlock};
pub use weapon::{AttackStats, ElementStats, WeaponStats};

use crate::catalog::{BuildLoader, BuildSnapshot, CatalogLookup};
use crate::defense::{total_defense, total_resistances};
use crate::set_bonus::{count_equipped_set_pieces, evaluate_thresholds, SetPieceCounts};
use crate::source::{
    ArmorSkillSource, CharmSkillSource, DecorationSkillSource, SetBonusSkillSource, SkillSource,
};
use crate::types::BuildId;
use thiserror::Error;
use tracing::debug;

/// Error returned by a build stats computation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildStatsError {
    #[error("Build not found: {0}")]
    BuildNotFound(BuildId),
}

/// Computes stats reports against a catalog
///
/// Holds nothing but a shared borrow of the catalog, so one engine can serve
/// any number of builds.
#[derive(Debug)]
pub struct BuildStatsEngine<'a, C: ?Sized> {
    catalog: &'a C,
}

impl<'a, C> BuildStatsEngine<'a, C>
where
    C: CatalogLookup + ?Sized,
{
    pub fn new(catalog: &'a C) -> Self {
        BuildStatsEngine { catalog }
    }

    /// Skill sources of a build, in application order
    pub fn skill_sources(
        &self,
        build: &BuildSnapshot,
        counts: &SetPieceCounts,
    ) -> Vec<Box<dyn SkillSource + 'a>> {
        let mut sources: Vec<Box<dyn SkillSource + 'a>> = vec![
            Box::new(ArmorSkillSource::new(self.catalog, build)),
            Box::new(CharmSkillSource::new(self.catalog, build)),
            Box::new(DecorationSkillSource::new(self.catalog, build)),
            Box::new(SetBonusSkillSource::new(self.catalog, counts)),
        ];
        sources.sort_by_key(|s| s.priority());
        sources
    }

    /// Deduplicated, capped skill list of a build
    pub fn aggregate_skills(&self, build: &BuildSnapshot, counts: &SetPieceCounts) -> Vec<SkillRow> {
        let mut skills = SkillAccumulator::new();
        for source in self.skill_sources(build, counts) {
            source.apply(&mut skills);
        }
        skills.finish()
    }

    /// Compute the report for an already loaded build
    pub fn compute_for_snapshot(&self, build: &BuildSnapshot) -> BuildStatsReport {
        let weapon = WeaponStats::from_weapon(build.weapon.as_ref());
        let counts = count_equipped_set_pieces(build);
        let set_bonuses = evaluate_thresholds(self.catalog, &counts);
        let defense = total_defense(build.equipped_armor());
        let resistances = total_resistances(build.equipped_armor());
        let skills = self.aggregate_skills(build, &counts);

        debug!(
            build = build.id.0,
            skills = skills.len(),
            set_bonuses = set_bonuses.len(),
            defense,
            "build stats computed"
        );

        BuildStatsReport {
            build_id: build.id,
            stats: StatsBlock {
                attack: weapon.attack,
                affinity: weapon.affinity,
                element: weapon.element,
                defense,
                resistances,
            },
            skills,
            set_bonuses,
        }
    }
}

impl<'a, C> BuildStatsEngine<'a, C>
where
    C: CatalogLookup + BuildLoader + ?Sized,
{
    /// Load a build and compute its report
    pub fn compute_build_stats(&self, build_id: BuildId) -> Result<BuildStatsReport, BuildStatsError> {
        let build = self
            .catalog
            .load_build(build_id)
            .ok_or(BuildStatsError::BuildNotFound(build_id))?;
        Ok(self.compute_for_snapshot(&build))
    }
}

/// Compute the stats report of a saved build
pub fn compute_build_stats<C>(catalog: &C, build_id: BuildId) -> Result<BuildStatsReport, BuildStatsError>
where
    C: CatalogLookup + BuildLoader + ?Sized,
{
    BuildStatsEngine::new(catalog).compute_build_stats(build_id)
}
