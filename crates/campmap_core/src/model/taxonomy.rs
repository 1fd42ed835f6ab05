//! Closed vocabularies used by campground records and filter criteria.
//!
//! # Responsibility
//! - Define the region, kind and amenity enumerations with stable wire strings.
//! - Provide the `all`-aware [`Selector`] used by filter criteria and the map.
//!
//! # Invariants
//! - Wire strings are lowercase snake_case and never change once published.
//! - `"all"` is reserved for [`Selector::All`] and is not a vocabulary value.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Selector string meaning "match every value".
pub const SELECTOR_ALL: &str = "all";

/// Shared contract for closed enumerations with stable wire strings.
pub trait Vocabulary: Copy + Eq + Sized + 'static {
    /// Every member, in declaration order.
    const VALUES: &'static [Self];
    /// Name of the vocabulary used in parse errors.
    const NAME: &'static str;

    /// Stable wire string.
    fn as_str(self) -> &'static str;

    /// Parses an exact wire string.
    fn parse(value: &str) -> Option<Self> {
        Self::VALUES
            .iter()
            .copied()
            .find(|candidate| candidate.as_str() == value)
    }
}

/// Geographic region partitioning the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    Moscow,
    Tver,
    Kaluga,
}

impl Region {
    /// Region name as shown to visitors.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Moscow => "Московская область",
            Self::Tver => "Тверская область",
            Self::Kaluga => "Калужская область",
        }
    }
}

impl Vocabulary for Region {
    const VALUES: &'static [Self] = &[Self::Moscow, Self::Tver, Self::Kaluga];
    const NAME: &'static str = "region";

    fn as_str(self) -> &'static str {
        match self {
            Self::Moscow => "moscow",
            Self::Tver => "tver",
            Self::Kaluga => "kaluga",
        }
    }
}

/// Accommodation style offered by a campground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampgroundKind {
    /// Tent pitches only.
    Tent,
    /// Cabins or small houses.
    Cabin,
    /// Hook-ups for motorhomes.
    Rv,
}

impl CampgroundKind {
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Tent => "Палаточный",
            Self::Cabin => "С домиками",
            Self::Rv => "Для автодомов",
        }
    }

    /// Map marker icon path for this kind.
    pub fn marker_icon(self) -> String {
        format!("/icons/{}-marker.svg", self.as_str())
    }
}

impl Vocabulary for CampgroundKind {
    const VALUES: &'static [Self] = &[Self::Tent, Self::Cabin, Self::Rv];
    const NAME: &'static str = "kind";

    fn as_str(self) -> &'static str {
        match self {
            Self::Tent => "tent",
            Self::Cabin => "cabin",
            Self::Rv => "rv",
        }
    }
}

/// Facility tag a campground can advertise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Amenity {
    Water,
    Fireplace,
    Electricity,
    Shower,
    Wifi,
    Playground,
    Kitchen,
    Laundry,
    Market,
    Fishing,
    Heating,
}

impl Amenity {
    pub fn label(self) -> &'static str {
        match self {
            Self::Water => "Вода",
            Self::Fireplace => "Костровище",
            Self::Electricity => "Электричество",
            Self::Shower => "Душ",
            Self::Wifi => "Wi-Fi",
            Self::Playground => "Детская площадка",
            Self::Kitchen => "Кухня",
            Self::Laundry => "Прачечная",
            Self::Market => "Магазин",
            Self::Fishing => "Рыбалка",
            Self::Heating => "Отопление",
        }
    }

    /// Icon name used by amenity badges.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Water => "Droplets",
            Self::Fireplace => "Flame",
            Self::Electricity => "Zap",
            Self::Shower => "Shower",
            Self::Wifi => "Wifi",
            Self::Playground => "Palmtree",
            Self::Kitchen => "UtensilsCrossed",
            Self::Laundry => "WashingMachine",
            Self::Market => "ShoppingBasket",
            Self::Fishing => "Fish",
            Self::Heating => "Thermometer",
        }
    }
}

impl Vocabulary for Amenity {
    const VALUES: &'static [Self] = &[
        Self::Water,
        Self::Fireplace,
        Self::Electricity,
        Self::Shower,
        Self::Wifi,
        Self::Playground,
        Self::Kitchen,
        Self::Laundry,
        Self::Market,
        Self::Fishing,
        Self::Heating,
    ];
    const NAME: &'static str = "amenity";

    fn as_str(self) -> &'static str {
        match self {
            Self::Water => "water",
            Self::Fireplace => "fireplace",
            Self::Electricity => "electricity",
            Self::Shower => "shower",
            Self::Wifi => "wifi",
            Self::Playground => "playground",
            Self::Kitchen => "kitchen",
            Self::Laundry => "laundry",
            Self::Market => "market",
            Self::Fishing => "fishing",
            Self::Heating => "heating",
        }
    }
}

/// Error for selector strings outside the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorParseError {
    pub vocabulary: &'static str,
    pub value: String,
}

impl Display for SelectorParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown {} `{}`", self.vocabulary, self.value)
    }
}

impl Error for SelectorParseError {}

/// Criterion over one vocabulary: everything, or exactly one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector<T> {
    All,
    Only(T),
}

impl<T> Default for Selector<T> {
    fn default() -> Self {
        Self::All
    }
}

impl<T: Vocabulary> Selector<T> {
    /// Returns whether `value` passes this selector.
    pub fn accepts(self, value: T) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == value,
        }
    }

    /// Returns the selected value, or `None` for `All`.
    pub fn value(self) -> Option<T> {
        match self {
            Self::All => None,
            Self::Only(value) => Some(value),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => SELECTOR_ALL,
            Self::Only(value) => value.as_str(),
        }
    }

    /// Lenient parse: unknown or blank input falls back to `All`.
    pub fn parse_or_all(value: &str) -> Self {
        value.parse().unwrap_or(Self::All)
    }
}

impl<T: Vocabulary> From<T> for Selector<T> {
    fn from(value: T) -> Self {
        Self::Only(value)
    }
}

impl<T: Vocabulary> FromStr for Selector<T> {
    type Err = SelectorParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim();
        if normalized == SELECTOR_ALL {
            return Ok(Self::All);
        }
        T::parse(normalized)
            .map(Self::Only)
            .ok_or_else(|| SelectorParseError {
                vocabulary: T::NAME,
                value: normalized.to_string(),
            })
    }
}

impl<T: Vocabulary> Display for Selector<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<T: Vocabulary> Serialize for Selector<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// `null` and blank strings decode as [`Selector::All`].
impl<'de, T: Vocabulary> Deserialize<'de> for Selector<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) if !raw.trim().is_empty() => raw.parse().map_err(D::Error::custom),
            _ => Ok(Self::All),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Amenity, CampgroundKind, Region, Selector, Vocabulary};

    #[test]
    fn selector_parses_all_and_values() {
        assert_eq!("all".parse::<Selector<Region>>(), Ok(Selector::All));
        assert_eq!(
            " tver ".parse::<Selector<Region>>(),
            Ok(Selector::Only(Region::Tver))
        );
        let err = "Tver"
            .parse::<Selector<Region>>()
            .expect_err("capitalized region must fail");
        assert_eq!(err.vocabulary, "region");
    }

    #[test]
    fn parse_or_all_falls_back_for_unknown_values() {
        assert_eq!(Selector::<Region>::parse_or_all("siberia"), Selector::All);
        assert_eq!(
            Selector::<CampgroundKind>::parse_or_all("rv"),
            Selector::Only(CampgroundKind::Rv)
        );
    }

    #[test]
    fn every_value_round_trips_through_wire_string() {
        for amenity in Amenity::VALUES {
            assert_eq!(Amenity::parse(amenity.as_str()), Some(*amenity));
        }
        assert!(Amenity::parse("all").is_none());
    }

    #[test]
    fn null_and_blank_selectors_decode_as_all() {
        let decoded: Vec<Selector<Amenity>> =
            serde_json::from_str(r#"[null, "", "all", "wifi"]"#).expect("selectors decode");
        assert_eq!(
            decoded,
            vec![
                Selector::All,
                Selector::All,
                Selector::All,
                Selector::Only(Amenity::Wifi)
            ]
        );
        assert!(serde_json::from_str::<Selector<Amenity>>(r#""sauna""#).is_err());
    }

    #[test]
    fn marker_icon_follows_kind() {
        assert_eq!(CampgroundKind::Cabin.marker_icon(), "/icons/cabin-marker.svg");
    }
}
