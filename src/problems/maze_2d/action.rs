use derive_more::Display;
use thiserror::Error;

use crate::space::Action;

/// Movement directions on the maze, in their canonical order.
///
/// Rows grow southwards and columns grow eastwards.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Maze2DAction {
    #[display("N")]
    N = 0, // row--
    #[display("S")]
    S = 1, // row++
    #[display("W")]
    W = 2, // col--
    #[display("E")]
    E = 3, // col++
    #[display("NW")]
    NW = 4, // row--, col--
    #[display("NE")]
    NE = 5, // row--, col++
    #[display("SW")]
    SW = 6, // row++, col--
    #[display("SE")]
    SE = 7, // row++, col++
}
impl Action for Maze2DAction {}

/// Cost class of an action.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq)]
pub enum ActionKind {
    #[display("orthogonal")]
    Orthogonal,
    #[display("diagonal")]
    Diagonal,
}

/// `(row delta, column delta)` of every action, indexed by discriminant.
#[rustfmt::skip]
const OFFSETS: [(isize, isize); 8] = [
    (-1,  0), // N
    ( 1,  0), // S
    ( 0, -1), // W
    ( 0,  1), // E
    (-1, -1), // NW
    (-1,  1), // NE
    ( 1, -1), // SW
    ( 1,  1), // SE
];

impl Maze2DAction {
    pub const ALL: [Maze2DAction; 8] = [
        Maze2DAction::N,
        Maze2DAction::S,
        Maze2DAction::W,
        Maze2DAction::E,
        Maze2DAction::NW,
        Maze2DAction::NE,
        Maze2DAction::SW,
        Maze2DAction::SE,
    ];

    #[inline(always)]
    pub fn offset(&self) -> (isize, isize) {
        OFFSETS[*self as usize]
    }

    #[inline(always)]
    pub fn kind(&self) -> ActionKind {
        if *self <= Maze2DAction::E {
            ActionKind::Orthogonal
        } else {
            ActionKind::Diagonal
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Maze2DAction::N => "N",
            Maze2DAction::S => "S",
            Maze2DAction::W => "W",
            Maze2DAction::E => "E",
            Maze2DAction::NW => "NW",
            Maze2DAction::NE => "NE",
            Maze2DAction::SW => "SW",
            Maze2DAction::SE => "SE",
        }
    }

    #[inline(always)]
    fn bit(&self) -> u8 {
        1u8 << (*self as u8)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid action '{symbol}'. Expected one of N, S, W, E, NW, NE, SW, SE")]
pub struct InvalidActionError {
    pub symbol: String,
}

impl std::str::FromStr for Maze2DAction {
    type Err = InvalidActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbol = s.trim();
        Maze2DAction::ALL
            .into_iter()
            .find(|a| a.symbol().eq_ignore_ascii_case(symbol))
            .ok_or_else(|| InvalidActionError {
                symbol: s.to_string(),
            })
    }
}

/// The set of actions a maze allows.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct ActionSet {
    bits: u8,
}

impl ActionSet {
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }
    pub const fn all() -> Self {
        Self { bits: u8::MAX }
    }
    pub const fn orthogonal() -> Self {
        Self { bits: 0b0000_1111 }
    }
    pub const fn diagonal() -> Self {
        Self { bits: 0b1111_0000 }
    }

    /// Parses a set of action symbols, failing on the first unknown one.
    pub fn from_symbols<I, S>(symbols: I) -> Result<Self, InvalidActionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::empty();
        for symbol in symbols {
            set.insert(symbol.as_ref().parse()?);
        }
        Ok(set)
    }

    #[inline(always)]
    pub fn contains(&self, a: Maze2DAction) -> bool {
        self.bits & a.bit() != 0
    }
    pub fn insert(&mut self, a: Maze2DAction) {
        self.bits |= a.bit();
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }
    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Iterates over the allowed actions in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = Maze2DAction> + '_ {
        Maze2DAction::ALL.into_iter().filter(|a| self.contains(*a))
    }
}

impl FromIterator<Maze2DAction> for ActionSet {
    fn from_iter<T: IntoIterator<Item = Maze2DAction>>(iter: T) -> Self {
        let mut set = Self::empty();
        for a in iter {
            set.insert(a);
        }
        set
    }
}

impl std::str::FromStr for ActionSet {
    type Err = InvalidActionError;

    /// Parses comma or whitespace separated symbols (`"N,S,E,W"`), or `all`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => return Ok(Self::all()),
            "orthogonal" => return Ok(Self::orthogonal()),
            "diagonal" => return Ok(Self::diagonal()),
            _ => {}
        }
        Self::from_symbols(
            s.split(|c: char| c == ',' || c.is_whitespace())
                .filter(|symbol| !symbol.is_empty()),
        )
    }
}

impl std::fmt::Debug for ActionSet {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl std::fmt::Display for ActionSet {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, a) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{a}")?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_match_cost_class() {
        for a in Maze2DAction::ALL {
            let (dr, dc) = a.offset();
            assert_eq!(dr.abs() + dc.abs(), match a.kind() {
                ActionKind::Orthogonal => 1,
                ActionKind::Diagonal => 2,
            });
        }
        assert_eq!(Maze2DAction::NE.offset(), (-1, 1));
        assert_eq!(Maze2DAction::SW.offset(), (1, -1));
    }

    #[test]
    fn parse_symbols() {
        assert_eq!("ne".parse::<Maze2DAction>().unwrap(), Maze2DAction::NE);
        assert_eq!(" W ".parse::<Maze2DAction>().unwrap(), Maze2DAction::W);
        let err = "Q".parse::<Maze2DAction>().unwrap_err();
        assert_eq!(err.symbol, "Q");
    }

    #[test]
    fn sets() {
        let set = ActionSet::from_symbols(["N", "S", "E", "W"]).unwrap();
        assert_eq!(set, ActionSet::orthogonal());
        assert_eq!(set.len(), 4);
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![Maze2DAction::N, Maze2DAction::S, Maze2DAction::W, Maze2DAction::E]
        );
        assert!(ActionSet::from_symbols(["N", "UP"]).is_err());

        assert_eq!("all".parse::<ActionSet>().unwrap(), ActionSet::all());
        assert_eq!("NW, SE".parse::<ActionSet>().unwrap().len(), 2);
        assert!(ActionSet::empty().is_empty());
        assert_eq!(ActionSet::diagonal().to_string(), "{NW, NE, SW, SE}");
    }
}
