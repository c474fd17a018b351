//! Generator options and the declarative TOML configuration.

use super::bounds::{CellBounds, CellValidator};
use super::distances::{DistanceSpec, DistanceTable};
use super::error::ConfigError;
use super::splits::{SplitConfig, SplitScheme};
use crate::model::atom::Atom;
use crate::model::cell::Cell;
use crate::model::fragment::Fragment;
use crate::model::molecules::molecule;
use crate::model::types::Element;
use serde::Deserialize;

/// A building block, either given explicitly or by name.
///
/// Names are tried as element symbols first (`"Si"`) and then as entries of
/// the built-in molecule table (`"H2O"`).
#[derive(Debug, Clone, PartialEq)]
pub enum BlockSpec {
    Fragment(Fragment),
    Name(String),
}

impl BlockSpec {
    pub fn resolve(&self) -> Result<Fragment, ConfigError> {
        match self {
            BlockSpec::Fragment(fragment) => Ok(fragment.clone()),
            BlockSpec::Name(name) => {
                if let Ok(element) = name.parse::<Element>() {
                    Ok(Fragment::single(element))
                } else {
                    molecule(name).ok_or_else(|| ConfigError::UnknownBlock(name.clone()))
                }
            }
        }
    }
}

impl From<&str> for BlockSpec {
    fn from(name: &str) -> Self {
        BlockSpec::Name(name.to_owned())
    }
}

impl From<String> for BlockSpec {
    fn from(name: String) -> Self {
        BlockSpec::Name(name)
    }
}

impl From<Element> for BlockSpec {
    fn from(element: Element) -> Self {
        BlockSpec::Fragment(Fragment::single(element))
    }
}

impl From<Fragment> for BlockSpec {
    fn from(fragment: Fragment) -> Self {
        BlockSpec::Fragment(fragment)
    }
}

/// Retry ceilings for the two sampling loops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AttemptLimits {
    /// Cells drawn before giving up on one candidate.
    pub max_cell_attempts: u32,
    /// Positions tried per block instance.
    pub max_placement_attempts: u32,
}

impl Default for AttemptLimits {
    fn default() -> Self {
        Self {
            max_cell_attempts: 100_000,
            max_placement_attempts: 100_000,
        }
    }
}

/// Optional generator settings.
#[derive(Debug, Default)]
pub struct Options {
    /// Shape constraints on sampled cells. Ignored when `cell` is set.
    pub cell_bounds: Option<Box<dyn CellValidator>>,
    /// Use this cell for every candidate instead of sampling one.
    pub cell: Option<Cell>,
    pub splits: SplitScheme,
    pub limits: AttemptLimits,
}

/// A complete generator description, as read from TOML.
///
/// ```toml
/// volume = 240.0
///
/// [[blocks]]
/// name = "Ti"
/// count = 4
///
/// [[blocks]]
/// name = "O"
/// count = 8
///
/// [blmin]
/// ratio = 0.7
///
/// [[splits]]
/// factors = [2]
/// weight = 1.0
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    pub volume: f64,
    pub blocks: Vec<BlockConfig>,
    pub blmin: DistanceConfig,
    #[serde(default)]
    pub splits: Vec<SplitConfig>,
    #[serde(default)]
    pub cell_bounds: Option<CellBounds>,
    #[serde(default)]
    pub cell: Option<[[f64; 3]; 3]>,
    #[serde(default)]
    pub limits: AttemptLimits,
}

/// One `[[blocks]]` entry: a `name` or an explicit `atoms` list, plus a count.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlockConfig {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub atoms: Vec<Atom>,
    pub count: usize,
}

/// The `[blmin]` table: a covalent `ratio` or an explicit pair `table`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DistanceConfig {
    #[serde(default)]
    pub ratio: Option<f64>,
    #[serde(default)]
    pub table: Vec<DistanceEntry>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DistanceEntry {
    pub a: Element,
    pub b: Element,
    pub distance: f64,
}

impl GeneratorConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    pub(crate) fn block_specs(&self) -> Result<Vec<(BlockSpec, usize)>, ConfigError> {
        self.blocks
            .iter()
            .enumerate()
            .map(|(index, block)| block.to_spec(index).map(|spec| (spec, block.count)))
            .collect()
    }

    pub(crate) fn options(&self) -> Result<Options, ConfigError> {
        Ok(Options {
            cell_bounds: self
                .cell_bounds
                .map(|bounds| Box::new(bounds) as Box<dyn CellValidator>),
            cell: self.cell.map(Cell::new),
            splits: SplitScheme::from_config(&self.splits)?,
            limits: self.limits,
        })
    }
}

impl BlockConfig {
    fn to_spec(&self, index: usize) -> Result<BlockSpec, ConfigError> {
        match (&self.name, self.atoms.is_empty()) {
            (Some(name), true) => Ok(BlockSpec::Name(name.clone())),
            (None, false) => Ok(BlockSpec::Fragment(Fragment::new(self.atoms.clone()))),
            _ => Err(ConfigError::AmbiguousBlock { index }),
        }
    }
}

impl DistanceConfig {
    pub(crate) fn to_spec(&self) -> Result<DistanceSpec, ConfigError> {
        match (self.ratio, self.table.is_empty()) {
            (Some(ratio), true) => Ok(DistanceSpec::CovalentRatio(ratio)),
            (None, false) => Ok(DistanceSpec::Table(self.table.iter().fold(
                DistanceTable::new(),
                |table, e| table.with(e.a, e.b, e.distance),
            ))),
            _ => Err(ConfigError::AmbiguousDistances),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_names_resolve_to_elements_before_molecules() {
        let si = BlockSpec::from("Si").resolve().unwrap();
        assert_eq!(si, Fragment::single(Element::Si));

        let water = BlockSpec::from("H2O").resolve().unwrap();
        assert_eq!(water.len(), 3);

        assert!(matches!(
            BlockSpec::from("Unobtainium").resolve(),
            Err(ConfigError::UnknownBlock(name)) if name == "Unobtainium"
        ));
    }

    #[test]
    fn default_limits() {
        let limits = AttemptLimits::default();
        assert_eq!(limits.max_cell_attempts, 100_000);
        assert_eq!(limits.max_placement_attempts, 100_000);
    }

    #[test]
    fn parses_named_blocks_with_ratio() {
        let config = GeneratorConfig::from_toml_str(
            r#"
            volume = 240.0

            [[blocks]]
            name = "Ti"
            count = 4

            [[blocks]]
            name = "O"
            count = 8

            [blmin]
            ratio = 0.7

            [[splits]]
            factors = [2]
            weight = 1.0

            [[splits]]
            factors = [1]
            weight = 3.0

            [limits]
            max_cell_attempts = 500
            "#,
        )
        .unwrap();

        assert_eq!(config.volume, 240.0);
        assert_eq!(config.blocks.len(), 2);
        assert_eq!(config.blocks[1].count, 8);
        assert_eq!(config.blmin.to_spec().unwrap(), DistanceSpec::CovalentRatio(0.7));
        assert_eq!(config.limits.max_cell_attempts, 500);
        assert_eq!(config.limits.max_placement_attempts, 100_000);

        let options = config.options().unwrap();
        assert_eq!(options.splits.splits().len(), 2);
        assert_eq!(options.splits.splits()[0].probability, 0.25);
        assert!(options.cell_bounds.is_none());
        assert!(options.cell.is_none());
    }

    #[test]
    fn parses_explicit_atoms_table_and_bounds() {
        let config = GeneratorConfig::from_toml_str(
            r#"
            volume = 50.0
            cell = [[4.0, 0.0, 0.0], [0.0, 4.0, 0.0], [0.0, 0.0, 4.0]]

            [[blocks]]
            count = 2
            atoms = [
                { element = "C", position = [0.0, 0.0, 0.0] },
                { element = "O", position = [0.0, 0.0, 1.13] },
            ]

            [[blmin.table]]
            a = "C"
            b = "C"
            distance = 1.2

            [[blmin.table]]
            a = "O"
            b = "C"
            distance = 1.1

            [[blmin.table]]
            a = "O"
            b = "O"
            distance = 1.2

            [cell_bounds]
            alpha = [60.0, 120.0]
            "#,
        )
        .unwrap();

        let specs = config.block_specs().unwrap();
        let fragment = specs[0].0.resolve().unwrap();
        assert_eq!(fragment.len(), 2);
        assert_eq!(fragment.atoms()[1].element, Element::O);
        assert_eq!(specs[0].1, 2);

        let DistanceSpec::Table(table) = config.blmin.to_spec().unwrap() else {
            panic!("expected an explicit table");
        };
        assert_eq!(table.get(Element::C, Element::O), Some(1.1));

        let bounds = config.cell_bounds.unwrap();
        assert_eq!(bounds.alpha, [60.0, 120.0]);
        assert_eq!(bounds.beta, CellBounds::default().beta);

        let options = config.options().unwrap();
        assert_eq!(options.cell.unwrap().volume(), 64.0);
        assert_eq!(options.splits, SplitScheme::trivial());
    }

    #[test]
    fn block_needs_exactly_one_source() {
        let config = GeneratorConfig::from_toml_str(
            r#"
            volume = 10.0
            [[blocks]]
            count = 1
            [blmin]
            ratio = 0.5
            "#,
        )
        .unwrap();
        assert!(matches!(
            config.block_specs(),
            Err(ConfigError::AmbiguousBlock { index: 0 })
        ));
    }

    #[test]
    fn distances_need_exactly_one_source() {
        let both = DistanceConfig {
            ratio: Some(0.5),
            table: vec![DistanceEntry {
                a: Element::H,
                b: Element::H,
                distance: 1.0,
            }],
        };
        assert!(matches!(both.to_spec(), Err(ConfigError::AmbiguousDistances)));
        assert!(matches!(
            DistanceConfig::default().to_spec(),
            Err(ConfigError::AmbiguousDistances)
        ));
    }

    #[test]
    fn unknown_keys_and_bad_symbols_are_rejected() {
        let err = GeneratorConfig::from_toml_str("volume = 1.0\nblocks = []\nbogus = 3\n[blmin]\nratio = 1.0\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));

        let err = GeneratorConfig::from_toml_str(
            r#"
            volume = 1.0
            blocks = []
            [[blmin.table]]
            a = "Xx"
            b = "H"
            distance = 1.0
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
