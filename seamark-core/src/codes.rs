//! Seamark classification and attribute code tables.
//!
//! The hydrographic export encodes categories, colours and colour patterns
//! as small integer codes, while OpenStreetMap uses lower-case names. Each
//! table lives here once, as an enumeration with an exhaustive mapping in
//! both directions.

use std::fmt;

/// Physical support of a seamark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Structure {
    /// Fixed structure on the seabed or shore.
    Beacon,
    /// Floating, moored structure.
    Buoy,
}

impl Structure {
    /// Parse the hydrographic `type` discriminator.
    #[must_use]
    pub fn from_discriminator(value: &str) -> Option<Self> {
        match value {
            "beacon" => Some(Self::Beacon),
            "buoy" => Some(Self::Buoy),
            _ => None,
        }
    }

    /// Name used as the first half of an OpenStreetMap seamark type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beacon => "beacon",
            Self::Buoy => "buoy",
        }
    }
}

/// Buoyage system a navigation aid belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkSystem {
    /// Marks placed relative to a hazard by compass quadrant.
    Cardinal,
    /// Marks placed along the sides of a channel.
    Lateral,
}

/// The type of a seamark, as carried by the `seamark:type` tag.
///
/// # Examples
/// ```
/// use seamark_core::{MarkSystem, SeamarkKind, Structure};
///
/// let kind = SeamarkKind::from_tag("buoy_lateral");
/// assert_eq!(kind.system(), Some(MarkSystem::Lateral));
/// assert_eq!(kind.tag(), "buoy_lateral");
/// assert_eq!(SeamarkKind::from_tag("light_minor").system(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SeamarkKind {
    /// A cardinal or lateral beacon or buoy.
    Aid {
        /// Physical support.
        structure: Structure,
        /// Buoyage system.
        system: MarkSystem,
    },
    /// Any other seamark type, kept verbatim.
    Other(String),
}

impl SeamarkKind {
    /// Build an aid kind.
    #[must_use]
    pub const fn aid(structure: Structure, system: MarkSystem) -> Self {
        Self::Aid { structure, system }
    }

    /// Parse an OpenStreetMap `seamark:type` value.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "beacon_cardinal" => Self::aid(Structure::Beacon, MarkSystem::Cardinal),
            "beacon_lateral" => Self::aid(Structure::Beacon, MarkSystem::Lateral),
            "buoy_cardinal" => Self::aid(Structure::Buoy, MarkSystem::Cardinal),
            "buoy_lateral" => Self::aid(Structure::Buoy, MarkSystem::Lateral),
            other => Self::Other(other.to_owned()),
        }
    }

    /// The `seamark:type` value, e.g. `beacon_cardinal`.
    #[must_use]
    pub fn tag(&self) -> &str {
        match self {
            Self::Aid {
                structure: Structure::Beacon,
                system: MarkSystem::Cardinal,
            } => "beacon_cardinal",
            Self::Aid {
                structure: Structure::Beacon,
                system: MarkSystem::Lateral,
            } => "beacon_lateral",
            Self::Aid {
                structure: Structure::Buoy,
                system: MarkSystem::Cardinal,
            } => "buoy_cardinal",
            Self::Aid {
                structure: Structure::Buoy,
                system: MarkSystem::Lateral,
            } => "buoy_lateral",
            Self::Other(tag) => tag,
        }
    }

    /// Buoyage system, if this kind is a cardinal or lateral aid.
    #[must_use]
    pub const fn system(&self) -> Option<MarkSystem> {
        match self {
            Self::Aid { system, .. } => Some(*system),
            Self::Other(_) => None,
        }
    }
}

impl fmt::Display for SeamarkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Quadrant indicated by a cardinal mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardinalDirection {
    /// Safe water lies to the north.
    North,
    /// Safe water lies to the east.
    East,
    /// Safe water lies to the south.
    South,
    /// Safe water lies to the west.
    West,
}

impl CardinalDirection {
    /// All directions in code order.
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Decode a hydrographic `CATCAM` value.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "1" => Some(Self::North),
            "2" => Some(Self::East),
            "3" => Some(Self::South),
            "4" => Some(Self::West),
            _ => None,
        }
    }

    /// Hydrographic `CATCAM` value.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::North => "1",
            Self::East => "2",
            Self::South => "3",
            Self::West => "4",
        }
    }

    /// Parse an OpenStreetMap category value.
    #[must_use]
    pub fn from_osm(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|dir| dir.as_osm() == value)
    }

    /// OpenStreetMap category value.
    #[must_use]
    pub const fn as_osm(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::East => "east",
            Self::South => "south",
            Self::West => "west",
        }
    }

    /// Reference `COLOUR` code string painted on a cardinal mark.
    ///
    /// Black is code 2 and yellow code 6; the top-mark cones point at the
    /// black bands.
    #[must_use]
    pub const fn reference_colour_codes(self) -> &'static str {
        match self {
            Self::North => "2,6",
            Self::East => "2,6,2",
            Self::South => "6,2",
            Self::West => "6,2,6",
        }
    }
}

/// Channel side indicated by a lateral mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LateralCategory {
    /// Port-hand mark.
    Port,
    /// Starboard-hand mark.
    Starboard,
    /// Bifurcation, preferred channel to starboard.
    PreferredChannelStarboard,
    /// Bifurcation, preferred channel to port.
    PreferredChannelPort,
}

impl LateralCategory {
    /// All categories in code order.
    pub const ALL: [Self; 4] = [
        Self::Port,
        Self::Starboard,
        Self::PreferredChannelStarboard,
        Self::PreferredChannelPort,
    ];

    /// Decode a hydrographic `CATLAM` value.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "1" => Some(Self::Port),
            "2" => Some(Self::Starboard),
            "3" => Some(Self::PreferredChannelStarboard),
            "4" => Some(Self::PreferredChannelPort),
            _ => None,
        }
    }

    /// Hydrographic `CATLAM` value.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Port => "1",
            Self::Starboard => "2",
            Self::PreferredChannelStarboard => "3",
            Self::PreferredChannelPort => "4",
        }
    }

    /// Parse an OpenStreetMap category value.
    #[must_use]
    pub fn from_osm(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|cat| cat.as_osm() == value)
    }

    /// OpenStreetMap category value.
    #[must_use]
    pub const fn as_osm(self) -> &'static str {
        match self {
            Self::Port => "port",
            Self::Starboard => "starboard",
            Self::PreferredChannelStarboard => "preferred_channel_starboard",
            Self::PreferredChannelPort => "preferred_channel_port",
        }
    }
}

/// Category of a navigation aid, tied to its [`MarkSystem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Category of a cardinal mark.
    Cardinal(CardinalDirection),
    /// Category of a lateral mark.
    Lateral(LateralCategory),
}

impl Category {
    /// Buoyage system this category belongs to.
    #[must_use]
    pub const fn system(self) -> MarkSystem {
        match self {
            Self::Cardinal(_) => MarkSystem::Cardinal,
            Self::Lateral(_) => MarkSystem::Lateral,
        }
    }

    /// Parse an OpenStreetMap category value within `system`.
    #[must_use]
    pub fn from_osm(system: MarkSystem, value: &str) -> Option<Self> {
        match system {
            MarkSystem::Cardinal => CardinalDirection::from_osm(value).map(Self::Cardinal),
            MarkSystem::Lateral => LateralCategory::from_osm(value).map(Self::Lateral),
        }
    }

    /// Decode a hydrographic category code within `system`.
    #[must_use]
    pub fn from_code(system: MarkSystem, code: &str) -> Option<Self> {
        match system {
            MarkSystem::Cardinal => CardinalDirection::from_code(code).map(Self::Cardinal),
            MarkSystem::Lateral => LateralCategory::from_code(code).map(Self::Lateral),
        }
    }

    /// OpenStreetMap category value.
    #[must_use]
    pub const fn as_osm(self) -> &'static str {
        match self {
            Self::Cardinal(dir) => dir.as_osm(),
            Self::Lateral(cat) => cat.as_osm(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_osm())
    }
}

/// Colour of a seamark body or band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Colour {
    /// Code 1.
    White,
    /// Code 2.
    Black,
    /// Code 3.
    Red,
    /// Code 4.
    Green,
    /// Code 5.
    Blue,
    /// Code 6.
    Yellow,
    /// Code 7.
    Grey,
    /// Code 8.
    Brown,
    /// Code 9.
    Amber,
    /// Code 10.
    Violet,
    /// Code 11.
    Orange,
    /// Code 12.
    Magenta,
    /// Code 13.
    Pink,
}

impl Colour {
    /// All colours in code order.
    pub const ALL: [Self; 13] = [
        Self::White,
        Self::Black,
        Self::Red,
        Self::Green,
        Self::Blue,
        Self::Yellow,
        Self::Grey,
        Self::Brown,
        Self::Amber,
        Self::Violet,
        Self::Orange,
        Self::Magenta,
        Self::Pink,
    ];

    /// Decode a hydrographic `COLOUR` code.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "1" => Some(Self::White),
            "2" => Some(Self::Black),
            "3" => Some(Self::Red),
            "4" => Some(Self::Green),
            "5" => Some(Self::Blue),
            "6" => Some(Self::Yellow),
            "7" => Some(Self::Grey),
            "8" => Some(Self::Brown),
            "9" => Some(Self::Amber),
            "10" => Some(Self::Violet),
            "11" => Some(Self::Orange),
            "12" => Some(Self::Magenta),
            "13" => Some(Self::Pink),
            _ => None,
        }
    }

    /// Parse an OpenStreetMap colour name.
    #[must_use]
    pub fn from_osm(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|colour| colour.as_osm() == name)
    }

    /// OpenStreetMap colour name.
    #[must_use]
    pub const fn as_osm(self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Black => "black",
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Yellow => "yellow",
            Self::Grey => "grey",
            Self::Brown => "brown",
            Self::Amber => "amber",
            Self::Violet => "violet",
            Self::Orange => "orange",
            Self::Magenta => "magenta",
            Self::Pink => "pink",
        }
    }
}

/// Join colours into an OpenStreetMap list value, e.g. `black;yellow`.
#[must_use]
pub fn join_colours(colours: &[Colour]) -> String {
    colours
        .iter()
        .map(|colour| colour.as_osm())
        .collect::<Vec<_>>()
        .join(";")
}

/// Arrangement of colour bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColourPattern {
    /// Code 1.
    Horizontal,
    /// Code 2.
    Vertical,
    /// Code 3.
    Diagonal,
}

impl ColourPattern {
    /// All patterns in code order.
    pub const ALL: [Self; 3] = [Self::Horizontal, Self::Vertical, Self::Diagonal];

    /// Decode a hydrographic `COLPAT` code.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "1" => Some(Self::Horizontal),
            "2" => Some(Self::Vertical),
            "3" => Some(Self::Diagonal),
            _ => None,
        }
    }

    /// Parse an OpenStreetMap colour pattern value.
    #[must_use]
    pub fn from_osm(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|pattern| pattern.as_osm() == value)
    }

    /// OpenStreetMap colour pattern value.
    #[must_use]
    pub const fn as_osm(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
            Self::Diagonal => "diagonal",
        }
    }
}
