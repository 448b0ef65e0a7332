//! Catalog - In-memory catalog indexed by row id

use super::{
    load_json, load_toml, parse_toml, Armor, ArmorSkill, BuildLoader, BuildRecord, BuildSnapshot,
    CatalogError, CatalogLookup, Charm, CharmSkill, Decoration, DecorationSkill, EquippedArmor,
    Monster, RankView, SetBonus, SetBonusRank, Skill, SkillLink, SocketedDecoration, Weapon,
};
use crate::types::{
    ArmorId, BuildId, CharmId, DecorationId, IntLike, SetBonusExternalId, SetBonusRowId,
    SkillExternalId, SkillRowId, WeaponId,
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt::Display;
use std::hash::Hash;
use std::path::Path;
use tracing::{debug, info};

/// Raw catalog tables, as stored in a snapshot file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogData {
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub weapons: Vec<Weapon>,
    #[serde(default)]
    pub armors: Vec<Armor>,
    #[serde(default)]
    pub armor_skills: Vec<ArmorSkill>,
    #[serde(default)]
    pub charms: Vec<Charm>,
    #[serde(default)]
    pub charm_skills: Vec<CharmSkill>,
    #[serde(default)]
    pub decorations: Vec<Decoration>,
    #[serde(default)]
    pub decoration_skills: Vec<DecorationSkill>,
    #[serde(default)]
    pub set_bonuses: Vec<SetBonus>,
    #[serde(default)]
    pub set_bonus_ranks: Vec<SetBonusRank>,
    #[serde(default)]
    pub builds: Vec<BuildRecord>,
    #[serde(default)]
    pub monsters: Vec<Monster>,
}

/// Immutable, validated catalog with id indexes
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    data: CatalogData,
    skills: HashMap<SkillRowId, usize>,
    skills_by_external: HashMap<SkillExternalId, usize>,
    weapons: HashMap<WeaponId, usize>,
    armors: HashMap<ArmorId, usize>,
    charms: HashMap<CharmId, usize>,
    decorations: HashMap<DecorationId, usize>,
    set_bonuses: HashMap<SetBonusRowId, usize>,
    set_bonuses_by_external: HashMap<SetBonusExternalId, usize>,
    builds: HashMap<BuildId, usize>,
}

/// Index a table by key, rejecting duplicates
fn index_unique<K>(table: &str, keys: impl Iterator<Item = K>) -> Result<HashMap<K, usize>, CatalogError>
where
    K: Eq + Hash + Display,
{
    let mut map = HashMap::new();
    for (position, key) in keys.enumerate() {
        if map.contains_key(&key) {
            return Err(CatalogError::ValidationError(format!(
                "duplicate id {key} in {table}"
            )));
        }
        map.insert(key, position);
    }
    Ok(map)
}

fn validate_build(build: &BuildRecord) -> Result<(), CatalogError> {
    let mut slots = HashSet::new();
    for piece in &build.armor_pieces {
        if !slots.insert(piece.slot) {
            return Err(CatalogError::ValidationError(format!(
                "build {} has more than one {} piece",
                build.id, piece.slot
            )));
        }
    }

    let mut sockets = HashSet::new();
    for socket in &build.decorations {
        if !sockets.insert((socket.slot, socket.socket_index)) {
            return Err(CatalogError::ValidationError(format!(
                "build {} uses socket {:?}#{} twice",
                build.id, socket.slot, socket.socket_index
            )));
        }
    }
    Ok(())
}

impl Catalog {
    /// Validate and index catalog tables
    pub fn from_data(data: CatalogData) -> Result<Self, CatalogError> {
        let skills = index_unique("skills", data.skills.iter().map(|s| s.id))?;
        let skills_by_external =
            index_unique("skills (external_id)", data.skills.iter().map(|s| s.external_id))?;
        let weapons = index_unique("weapons", data.weapons.iter().map(|w| w.id))?;
        let armors = index_unique("armors", data.armors.iter().map(|a| a.id))?;
        let charms = index_unique("charms", data.charms.iter().map(|c| c.id))?;
        let decorations = index_unique("decorations", data.decorations.iter().map(|d| d.id))?;
        let set_bonuses = index_unique("set_bonuses", data.set_bonuses.iter().map(|b| b.id))?;
        let set_bonuses_by_external = index_unique(
            "set_bonuses (external_id)",
            data.set_bonuses.iter().map(|b| b.external_id),
        )?;
        let builds = index_unique("builds", data.builds.iter().map(|b| b.id))?;

        for build in &data.builds {
            validate_build(build)?;
        }

        Ok(Catalog {
            data,
            skills,
            skills_by_external,
            weapons,
            armors,
            charms,
            decorations,
            set_bonuses,
            set_bonuses_by_external,
            builds,
        })
    }

    /// Load a catalog snapshot, choosing the format from the file extension
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        let data: CatalogData = match extension.as_str() {
            "toml" => load_toml(path)?,
            "json" => load_json(path)?,
            _ => return Err(CatalogError::UnsupportedFormat(path.display().to_string())),
        };

        let catalog = Self::from_data(data)?;
        info!(
            path = %path.display(),
            skills = catalog.data.skills.len(),
            weapons = catalog.data.weapons.len(),
            armors = catalog.data.armors.len(),
            builds = catalog.data.builds.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Parse a catalog from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        Self::from_data(parse_toml(content)?)
    }

    /// Parse a catalog from a JSON string
    pub fn from_json_str(content: &str) -> Result<Self, CatalogError> {
        Self::from_data(serde_json::from_str(content)?)
    }

    /// Raw tables
    pub fn data(&self) -> &CatalogData {
        &self.data
    }

    pub fn skills(&self) -> &[Skill] {
        &self.data.skills
    }

    pub fn weapons(&self) -> &[Weapon] {
        &self.data.weapons
    }

    pub fn armors(&self) -> &[Armor] {
        &self.data.armors
    }

    pub fn charms(&self) -> &[Charm] {
        &self.data.charms
    }

    pub fn decorations(&self) -> &[Decoration] {
        &self.data.decorations
    }

    pub fn monsters(&self) -> &[Monster] {
        &self.data.monsters
    }

    pub fn builds(&self) -> &[BuildRecord] {
        &self.data.builds
    }

    pub fn build_record(&self, id: BuildId) -> Option<&BuildRecord> {
        self.builds.get(&id).map(|&i| &self.data.builds[i])
    }

    pub fn skill_by_external_id(&self, id: SkillExternalId) -> Option<&Skill> {
        self.skills_by_external.get(&id).map(|&i| &self.data.skills[i])
    }

    pub fn set_bonus_by_external_id(&self, id: SetBonusExternalId) -> Option<&SetBonus> {
        self.set_bonuses_by_external
            .get(&id)
            .map(|&i| &self.data.set_bonuses[i])
    }

    /// Monster by exact name
    pub fn monster_by_name(&self, name: &str) -> Option<&Monster> {
        self.data.monsters.iter().find(|m| m.name == name)
    }

    /// Resolve a join row's skill, dropping rows that point at a missing skill
    fn link<'a>(
        &'a self,
        owner: &str,
        owner_id: i64,
        skill_id: SkillRowId,
        level: Option<&'a IntLike>,
    ) -> Option<SkillLink<'a>> {
        match self.skill(skill_id) {
            Some(skill) => Some(SkillLink { skill, level }),
            None => {
                debug!(owner, owner_id, skill_id = skill_id.0, "skill row missing, link dropped");
                None
            }
        }
    }
}

impl CatalogLookup for Catalog {
    fn skill(&self, id: SkillRowId) -> Option<&Skill> {
        self.skills.get(&id).map(|&i| &self.data.skills[i])
    }

    fn skills_by_external_id(&self, ids: &[SkillExternalId]) -> Vec<&Skill> {
        ids.iter()
            .filter_map(|id| self.skill_by_external_id(*id))
            .collect()
    }

    fn weapon(&self, id: WeaponId) -> Option<&Weapon> {
        self.weapons.get(&id).map(|&i| &self.data.weapons[i])
    }

    fn armor(&self, id: ArmorId) -> Option<&Armor> {
        self.armors.get(&id).map(|&i| &self.data.armors[i])
    }

    fn charm(&self, id: CharmId) -> Option<&Charm> {
        self.charms.get(&id).map(|&i| &self.data.charms[i])
    }

    fn decoration(&self, id: DecorationId) -> Option<&Decoration> {
        self.decorations.get(&id).map(|&i| &self.data.decorations[i])
    }

    fn armor_skills(&self, armor_ids: &[ArmorId]) -> Vec<SkillLink<'_>> {
        self.data
            .armor_skills
            .iter()
            .filter(|row| armor_ids.contains(&row.armor_id))
            .filter_map(|row| self.link("armor", row.armor_id.0, row.skill_id, row.level.as_ref()))
            .collect()
    }

    fn charm_skills(&self, charm_id: CharmId) -> Vec<SkillLink<'_>> {
        self.data
            .charm_skills
            .iter()
            .filter(|row| row.charm_id == charm_id)
            .filter_map(|row| self.link("charm", row.charm_id.0, row.skill_id, row.level.as_ref()))
            .collect()
    }

    fn decoration_skills(&self, decoration_ids: &[DecorationId]) -> Vec<SkillLink<'_>> {
        self.data
            .decoration_skills
            .iter()
            .filter(|row| decoration_ids.contains(&row.decoration_id))
            .filter_map(|row| {
                self.link("decoration", row.decoration_id.0, row.skill_id, row.level.as_ref())
            })
            .collect()
    }

    fn set_bonus_ranks(&self, bonus_ids: &[SetBonusExternalId]) -> Vec<RankView<'_>> {
        let bonuses: HashMap<SetBonusRowId, &SetBonus> = bonus_ids
            .iter()
            .filter_map(|id| self.set_bonus_by_external_id(*id))
            .map(|bonus| (bonus.id, bonus))
            .collect();

        let mut ranks: Vec<RankView<'_>> = self
            .data
            .set_bonus_ranks
            .iter()
            .filter_map(|rank| {
                let set_bonus = *bonuses.get(&rank.set_bonus_id)?;
                Some(RankView {
                    set_bonus,
                    rank,
                    skill: rank.skill_id.and_then(|id| self.skill(id)),
                })
            })
            .collect();

        ranks.sort_by(|a, b| {
            a.bonus_id()
                .cmp(&b.bonus_id())
                .then(a.pieces().cmp(&b.pieces()))
                .then(a.skill.map(|s| s.name.as_str()).cmp(&b.skill.map(|s| s.name.as_str())))
                .then(a.level().cmp(&b.level()))
        });
        ranks
    }
}

impl BuildLoader for Catalog {
    fn load_build(&self, id: BuildId) -> Option<BuildSnapshot> {
        let record = self.build_record(id)?;

        let weapon = record.weapon_id.and_then(|weapon_id| {
            let weapon = self.weapon(weapon_id).cloned();
            if weapon.is_none() {
                debug!(build = id.0, weapon = weapon_id.0, "weapon row missing");
            }
            weapon
        });

        let charm = record.charm_id.and_then(|charm_id| {
            let charm = self.charm(charm_id).cloned();
            if charm.is_none() {
                debug!(build = id.0, charm = charm_id.0, "charm row missing");
            }
            charm
        });

        let armor_pieces = record
            .armor_pieces
            .iter()
            .map(|piece| EquippedArmor {
                slot: piece.slot,
                armor: piece.armor_id.and_then(|armor_id| self.armor(armor_id).cloned()),
            })
            .collect();

        let decorations = record
            .decorations
            .iter()
            .map(|socket| SocketedDecoration {
                slot: socket.slot,
                socket_index: socket.socket_index,
                decoration: socket
                    .decoration_id
                    .and_then(|decoration_id| self.decoration(decoration_id).cloned()),
            })
            .collect();

        Some(BuildSnapshot {
            id: record.id,
            weapon,
            charm,
            armor_pieces,
            decorations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ArmorType;

    const CATALOG: &str = r#"
[[skills]]
id = 1
external_id = 429
name = "Hunger Resistance"
max_level = 3

[[skills]]
id = 2
external_id = 15
name = "Attack Boost"
max_level = 7

[[armors]]
id = 10
name = "Leather Headgear"
armor_type = "head"
defense_base = 2
res_fire = 2
armor_set_bonus_external_id = 200

[[armor_skills]]
armor_id = 10
skill_id = 1
level = 1

[[armor_skills]]
armor_id = 10
skill_id = 99
level = 1

[[set_bonuses]]
id = 5
external_id = 200
name = "Leather Set"

[[set_bonus_ranks]]
set_bonus_id = 5
pieces = 4
skill_id = 2
level = 2

[[set_bonus_ranks]]
set_bonus_id = 5
pieces = 2
skill_id = 2
level = 1

[[builds]]
id = 1
name = "Starter"
weapon_id = 77

[[builds.armor_pieces]]
slot = "head"
armor_id = 10

[[builds.armor_pieces]]
slot = "chest"
"#;

    #[test]
    fn test_parse_catalog() {
        let catalog = Catalog::from_toml_str(CATALOG).unwrap();
        assert_eq!(catalog.skills().len(), 2);
        assert_eq!(
            catalog.skill_by_external_id(SkillExternalId(429)).map(|s| s.name.as_str()),
            Some("Hunger Resistance")
        );
        assert!(catalog.skill(SkillRowId(429)).is_none());
    }

    #[test]
    fn test_dangling_skill_link_is_dropped() {
        let catalog = Catalog::from_toml_str(CATALOG).unwrap();
        let links = catalog.armor_skills(&[ArmorId(10)]);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].skill.external_id, SkillExternalId(429));
    }

    #[test]
    fn test_set_bonus_ranks_ordered_by_pieces() {
        let catalog = Catalog::from_toml_str(CATALOG).unwrap();
        let ranks = catalog.set_bonus_ranks(&[SetBonusExternalId(200)]);
        let pieces: Vec<i64> = ranks.iter().map(|r| r.pieces()).collect();
        assert_eq!(pieces, vec![2, 4]);
        assert!(catalog.set_bonus_ranks(&[SetBonusExternalId(201)]).is_empty());
    }

    #[test]
    fn test_load_build_resolves_references() {
        let catalog = Catalog::from_toml_str(CATALOG).unwrap();
        let build = catalog.load_build(BuildId(1)).unwrap();

        // weapon 77 does not exist
        assert!(build.weapon.is_none());
        assert_eq!(build.armor_pieces.len(), 2);
        assert_eq!(build.armor_pieces[0].slot, ArmorType::Head);
        assert_eq!(build.equipped_armor().count(), 1);
        assert!(catalog.load_build(BuildId(2)).is_none());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let toml = r#"
[[skills]]
id = 1
external_id = 1
name = "A"

[[skills]]
id = 1
external_id = 2
name = "B"
"#;
        let err = Catalog::from_toml_str(toml).unwrap_err();
        assert!(matches!(err, CatalogError::ValidationError(_)));
    }

    #[test]
    fn test_duplicate_build_slot_rejected() {
        let toml = r#"
[[builds]]
id = 1

[[builds.armor_pieces]]
slot = "head"

[[builds.armor_pieces]]
slot = "head"
"#;
        let err = Catalog::from_toml_str(toml).unwrap_err();
        assert!(err.to_string().contains("more than one head"));
    }

    #[test]
    fn test_duplicate_socket_rejected() {
        let toml = r#"
[[builds]]
id = 1

[[builds.decorations]]
slot = "chest"
socket_index = 0

[[builds.decorations]]
slot = "chest"
socket_index = 0
"#;
        assert!(Catalog::from_toml_str(toml).is_err());
    }

    #[test]
    fn test_json_catalog() {
        let json = r#"{
            "skills": [{"id": 1, "external_id": 7, "name": "Guard", "max_level": "5"}]
        }"#;
        let catalog = Catalog::from_json_str(json).unwrap();
        assert_eq!(catalog.skills()[0].level_cap(), 5);
    }

    #[test]
    fn test_unsupported_extension() {
        let err = Catalog::load(Path::new("catalog.yaml")).unwrap_err();
        assert!(matches!(err, CatalogError::UnsupportedFormat(_)));
    }
}
