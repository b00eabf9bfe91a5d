use crate::models::accounts::{Account, Department, Role};
use serde::{Serialize, Serializer};

/// Closed set of card style identifiers. `Crimson` heads the catalog and is
/// the explicit default: parsing an unknown stored id resolves to it instead
/// of failing, so removing a style from the catalog can never break old
/// messages.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CardStyleId {
    #[default]
    Crimson,
    Azure,
    Gold,
    FestivalLogo,
    Sky,
    Sunset,
    Letter,
    ExecutiveBoard,
    Operations,
    Performance,
    Development,
    PublicRelations,
    Finance,
    ParticipatingGroups,
    ExternalAffairs,
    Production,
    GeneralAffairs,
    Executive,
    ViceDirector,
    SectionChief,
}

impl CardStyleId {
    pub const fn as_str(&self) -> &'static str {
        match self {
            CardStyleId::Crimson => "crimson",
            CardStyleId::Azure => "azure",
            CardStyleId::Gold => "gold",
            CardStyleId::FestivalLogo => "festival-logo",
            CardStyleId::Sky => "sky",
            CardStyleId::Sunset => "sunset",
            CardStyleId::Letter => "letter",
            CardStyleId::ExecutiveBoard => "executive-board",
            CardStyleId::Operations => "operations",
            CardStyleId::Performance => "performance",
            CardStyleId::Development => "development",
            CardStyleId::PublicRelations => "public-relations",
            CardStyleId::Finance => "finance",
            CardStyleId::ParticipatingGroups => "participating-groups",
            CardStyleId::ExternalAffairs => "external-affairs",
            CardStyleId::Production => "production",
            CardStyleId::GeneralAffairs => "general-affairs",
            CardStyleId::Executive => "executive",
            CardStyleId::ViceDirector => "vice-director",
            CardStyleId::SectionChief => "section-chief",
        }
    }

    /// Total parse: unknown ids fall back to the default entry.
    pub fn parse(value: &str) -> CardStyleId {
        CARD_STYLES
            .iter()
            .map(|style| style.id)
            .find(|id| id.as_str() == value)
            .unwrap_or_default()
    }

    /// Catalog lookup. Every id variant has a catalog entry, so this is
    /// total as well.
    pub fn style(self) -> &'static CardStyle {
        CARD_STYLES
            .iter()
            .find(|style| style.id == self)
            .unwrap_or(&CARD_STYLES[0])
    }
}

impl Serialize for CardStyleId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Geometric container rule, independent of style. Square, circle and
/// octagon are plain transforms of a fixed-aspect container; speech-bubble
/// is free-height with a pointer decoration; heart clips long text.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CardShape {
    #[default]
    Square,
    Circle,
    SpeechBubble,
    Heart,
    Octagon,
}

/// Heart cards truncate past this many rendered lines. Documented lossy
/// behavior, not a bug.
pub const HEART_MAX_LINES: u32 = 5;

impl CardShape {
    pub const ALL: [CardShape; 5] = [
        CardShape::Square,
        CardShape::Circle,
        CardShape::SpeechBubble,
        CardShape::Heart,
        CardShape::Octagon,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            CardShape::Square => "square",
            CardShape::Circle => "circle",
            CardShape::SpeechBubble => "speech-bubble",
            CardShape::Heart => "heart",
            CardShape::Octagon => "octagon",
        }
    }

    /// Total parse: absent or unknown shapes render as squares.
    pub fn parse(value: &str) -> CardShape {
        CardShape::ALL
            .into_iter()
            .find(|shape| shape.as_str() == value)
            .unwrap_or_default()
    }

    pub const fn fixed_aspect(&self) -> bool {
        !matches!(self, CardShape::SpeechBubble)
    }

    pub const fn has_pointer(&self) -> bool {
        matches!(self, CardShape::SpeechBubble)
    }

    pub const fn max_lines(&self) -> Option<u32> {
        match self {
            CardShape::Heart => Some(HEART_MAX_LINES),
            _ => None,
        }
    }
}

impl Serialize for CardShape {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A catalog entry: render tokens plus the eligibility restriction. Empty
/// `departments` and `roles` means universally eligible.
#[derive(Debug, Serialize)]
pub struct CardStyle {
    pub id: CardStyleId,
    pub name: &'static str,
    pub bg_gradient: &'static str,
    pub border_color: &'static str,
    pub text_color: &'static str,
    pub background_image: Option<&'static str>,
    pub has_background_image: bool,
    pub departments: &'static [Department],
    pub roles: &'static [Role],
}

impl CardStyle {
    pub fn eligible_for(&self, account: &Account) -> bool {
        if self.departments.is_empty() && self.roles.is_empty() {
            return true;
        }
        if self.departments.contains(&account.department) {
            return true;
        }
        account.role.is_some_and(|role| self.roles.contains(&role))
    }
}

const fn theme(
    id: CardStyleId,
    name: &'static str,
    bg_gradient: &'static str,
    border_color: &'static str,
    text_color: &'static str,
) -> CardStyle {
    CardStyle {
        id,
        name,
        bg_gradient,
        border_color,
        text_color,
        background_image: None,
        has_background_image: false,
        departments: &[],
        roles: &[],
    }
}

const fn backdrop(
    id: CardStyleId,
    name: &'static str,
    bg_gradient: &'static str,
    border_color: &'static str,
    text_color: &'static str,
    background_image: &'static str,
) -> CardStyle {
    CardStyle {
        id,
        name,
        bg_gradient,
        border_color,
        text_color,
        background_image: Some(background_image),
        has_background_image: true,
        departments: &[],
        roles: &[],
    }
}

const fn department_card(
    id: CardStyleId,
    name: &'static str,
    bg_gradient: &'static str,
    border_color: &'static str,
    text_color: &'static str,
    departments: &'static [Department],
) -> CardStyle {
    CardStyle {
        id,
        name,
        bg_gradient,
        border_color,
        text_color,
        background_image: None,
        has_background_image: false,
        departments,
        roles: &[],
    }
}

const fn role_card(
    id: CardStyleId,
    name: &'static str,
    bg_gradient: &'static str,
    border_color: &'static str,
    text_color: &'static str,
    roles: &'static [Role],
) -> CardStyle {
    CardStyle {
        id,
        name,
        bg_gradient,
        border_color,
        text_color,
        background_image: None,
        has_background_image: false,
        departments: &[],
        roles,
    }
}

/// The catalog. Declaration order is presentation order; the first entry is
/// the fallback for unknown stored ids.
pub static CARD_STYLES: [CardStyle; 20] = [
    // Universal theme colors.
    theme(
        CardStyleId::Crimson,
        "Crimson",
        "bg-[#B5364A]",
        "border-[#B5364A]",
        "text-white",
    ),
    theme(
        CardStyleId::Azure,
        "Azure",
        "bg-[#3571B8]",
        "border-[#3571B8]",
        "text-white",
    ),
    theme(
        CardStyleId::Gold,
        "Gold",
        "bg-[#D8CE48]",
        "border-[#D8CE48]",
        "text-black",
    ),
    // Background images.
    backdrop(
        CardStyleId::FestivalLogo,
        "Festival Logo",
        "from-pink-100 to-pink-100",
        "border-pink-300",
        "text-gray-800",
        "/images/festival-logo.jpg",
    ),
    backdrop(
        CardStyleId::Sky,
        "Blue Sky",
        "from-blue-100 to-blue-200",
        "border-blue-300",
        "text-gray-800",
        "/images/sky.jpg",
    ),
    backdrop(
        CardStyleId::Sunset,
        "Sunset",
        "from-orange-100 to-orange-200",
        "border-orange-300",
        "text-gray-800",
        "/images/sunset.jpg",
    ),
    backdrop(
        CardStyleId::Letter,
        "Letter Paper",
        "bg-white",
        "border-gray-200",
        "text-gray-800",
        "/images/letter-paper.jpg",
    ),
    // Department-restricted cards.
    department_card(
        CardStyleId::ExecutiveBoard,
        "Executive Board",
        "from-purple-900 via-indigo-900 to-purple-800",
        "border-purple-950",
        "text-white",
        &[Department::ExecutiveBoard],
    ),
    department_card(
        CardStyleId::Operations,
        "Operations",
        "from-orange-200 to-orange-300",
        "border-orange-500",
        "text-gray-800",
        &[Department::Operations],
    ),
    department_card(
        CardStyleId::Performance,
        "Performance",
        "from-cyan-200 to-cyan-300",
        "border-cyan-500",
        "text-gray-800",
        &[Department::Performance],
    ),
    department_card(
        CardStyleId::Development,
        "Development",
        "from-purple-200 to-purple-300",
        "border-purple-500",
        "text-gray-800",
        &[Department::Development],
    ),
    department_card(
        CardStyleId::PublicRelations,
        "Public Relations",
        "from-pink-200 to-pink-300",
        "border-pink-500",
        "text-gray-800",
        &[Department::PublicRelations],
    ),
    department_card(
        CardStyleId::Finance,
        "Finance",
        "from-teal-200 to-teal-300",
        "border-teal-500",
        "text-gray-800",
        &[Department::Finance],
    ),
    department_card(
        CardStyleId::ParticipatingGroups,
        "Participating Groups",
        "from-yellow-200 to-yellow-300",
        "border-yellow-500",
        "text-gray-800",
        &[Department::ParticipatingGroups],
    ),
    department_card(
        CardStyleId::ExternalAffairs,
        "External Affairs",
        "from-amber-200 to-amber-300",
        "border-amber-600",
        "text-gray-800",
        &[Department::ExternalAffairs],
    ),
    department_card(
        CardStyleId::Production,
        "Production",
        "from-blue-300 to-blue-400",
        "border-blue-600",
        "text-gray-800",
        &[Department::Production],
    ),
    department_card(
        CardStyleId::GeneralAffairs,
        "General Affairs",
        "from-lime-200 to-lime-300",
        "border-lime-500",
        "text-gray-800",
        &[Department::GeneralAffairs],
    ),
    // Role-restricted cards.
    role_card(
        CardStyleId::Executive,
        "Executives Only",
        "from-amber-400 via-yellow-500 to-amber-600",
        "border-yellow-600",
        "text-gray-900",
        &[Role::Executive],
    ),
    role_card(
        CardStyleId::ViceDirector,
        "Vice Directors Only",
        "from-slate-300 via-gray-300 to-slate-400",
        "border-slate-300",
        "text-gray-900",
        &[Role::ViceDirector],
    ),
    role_card(
        CardStyleId::SectionChief,
        "Section Chiefs Only",
        "from-cyan-400 via-teal-400 to-cyan-500",
        "border-cyan-400",
        "text-gray-900",
        &[Role::SectionChief],
    ),
];

/// Styles the account may pick, in catalog declaration order.
pub fn eligible_styles(account: &Account) -> impl Iterator<Item = &'static CardStyle> {
    CARD_STYLES
        .iter()
        .filter(move |style| style.eligible_for(account))
}

/// Shape layout rules in a serializable form for the picker UI.
#[derive(Serialize)]
pub struct ShapeView {
    pub id: CardShape,
    pub fixed_aspect: bool,
    pub pointer: bool,
    pub max_lines: Option<u32>,
}

impl From<CardShape> for ShapeView {
    fn from(shape: CardShape) -> Self {
        Self {
            id: shape,
            fixed_aspect: shape.fixed_aspect(),
            pointer: shape.has_pointer(),
            max_lines: shape.max_lines(),
        }
    }
}

#[derive(Serialize)]
pub struct StylesResponse {
    pub styles: Vec<&'static CardStyle>,
    pub shapes: Vec<ShapeView>,
}
