//! Visual document model handed to the tile renderer.
//!
//! Plain immutable data: a document is a list of blocks, a block is a text
//! line or a group, a group is a row of weighted subgroups, and a subgroup
//! stacks text and image leaves. The builder methods only assemble values.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TileSize {
    Small,
    Medium,
    Wide,
    Large,
}

impl TileSize {
    pub const ALL: [TileSize; 4] = [Self::Small, Self::Medium, Self::Wide, Self::Large];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Wide => "wide",
            Self::Large => "large",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TileCategory {
    Current,
    CurrentDetails,
    Hourly,
    Daily,
}

impl TileCategory {
    /// Categories in the order they are queued on a tile
    pub const ALL: [TileCategory; 4] = [
        Self::Current,
        Self::CurrentDetails,
        Self::Hourly,
        Self::Daily,
    ];

    /// Sizes this category provides a layout for
    pub fn sizes(&self) -> &'static [TileSize] {
        match self {
            Self::Current => &TileSize::ALL,
            Self::CurrentDetails => &[TileSize::Medium, TileSize::Wide],
            Self::Hourly | Self::Daily => &[TileSize::Medium, TileSize::Wide, TileSize::Large],
        }
    }

    pub fn supports(&self, size: TileSize) -> bool {
        self.sizes().contains(&size)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::CurrentDetails => "currentDetails",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextStyle {
    Caption,
    CaptionSubtle,
    Body,
    Base,
    BaseSubtle,
    Subtitle,
    SubtitleSubtle,
    Title,
    TitleSubtle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Vertical placement of the content inside its container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextStacking {
    Top,
    Center,
    Bottom,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Text {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<TextStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<TextAlign>,
}

impl Text {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: None,
            align: None,
        }
    }

    /// Empty line used for vertical spacing
    pub fn spacer() -> Self {
        Self::default()
    }

    pub fn style(mut self, style: TextStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn align(mut self, align: TextAlign) -> Self {
        self.align = Some(align);
        self
    }

    pub fn centered(self) -> Self {
        self.align(TextAlign::Center)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub source: String,
    #[serde(default)]
    pub remove_margin: bool,
}

impl Image {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            remove_margin: false,
        }
    }

    /// Icon drawn edge to edge, the way every tile icon is placed
    pub fn icon(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            remove_margin: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Leaf {
    Text(Text),
    Image(Image),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subgroup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stacking: Option<TextStacking>,
    #[serde(default)]
    pub children: Vec<Leaf>,
}

impl Subgroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn weighted(weight: u32) -> Self {
        Self {
            weight: Some(weight),
            ..Self::default()
        }
    }

    pub fn stacking(mut self, stacking: TextStacking) -> Self {
        self.stacking = Some(stacking);
        self
    }

    pub fn text(mut self, text: Text) -> Self {
        self.children.push(Leaf::Text(text));
        self
    }

    pub fn image(mut self, image: Image) -> Self {
        self.children.push(Leaf::Image(image));
        self
    }

    pub fn texts(&self) -> impl Iterator<Item = &Text> {
        self.children.iter().filter_map(|leaf| match leaf {
            Leaf::Text(t) => Some(t),
            Leaf::Image(_) => None,
        })
    }

    pub fn images(&self) -> impl Iterator<Item = &Image> {
        self.children.iter().filter_map(|leaf| match leaf {
            Leaf::Image(i) => Some(i),
            Leaf::Text(_) => None,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub subgroups: Vec<Subgroup>,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subgroup(mut self, subgroup: Subgroup) -> Self {
        self.subgroups.push(subgroup);
        self
    }
}

impl FromIterator<Subgroup> for Group {
    fn from_iter<I: IntoIterator<Item = Subgroup>>(iter: I) -> Self {
        Self {
            subgroups: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Block {
    Text(Text),
    Group(Group),
}

/// Layout of one category at one tile size
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualDocument {
    pub size: TileSize,
    pub category: TileCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stacking: Option<TextStacking>,
    pub children: Vec<Block>,
}

impl VisualDocument {
    pub fn new(size: TileSize, category: TileCategory) -> Self {
        Self {
            size,
            category,
            stacking: None,
            children: Vec::new(),
        }
    }

    pub fn stacking(mut self, stacking: TextStacking) -> Self {
        self.stacking = Some(stacking);
        self
    }

    pub fn text(mut self, text: Text) -> Self {
        self.children.push(Block::Text(text));
        self
    }

    pub fn group(mut self, group: Group) -> Self {
        self.children.push(Block::Group(group));
        self
    }

    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.children.iter().filter_map(|block| match block {
            Block::Group(g) => Some(g),
            Block::Text(_) => None,
        })
    }

    /// Every text in the document, top-level lines and leaves alike, in order
    pub fn all_texts(&self) -> Vec<&Text> {
        let mut texts = Vec::new();
        for block in &self.children {
            match block {
                Block::Text(t) => texts.push(t),
                Block::Group(g) => {
                    for subgroup in &g.subgroups {
                        texts.extend(subgroup.texts());
                    }
                }
            }
        }
        texts
    }

    /// Every image source in the document, in order
    pub fn image_sources(&self) -> Vec<&str> {
        self.groups()
            .flat_map(|g| g.subgroups.iter())
            .flat_map(|s| s.images())
            .map(|i| i.source.as_str())
            .collect()
    }
}

/// Everything queued on a tile for one category: one document per supported
/// size plus the lock screen status line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileContent {
    pub category: TileCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lock_detailed_status: Option<String>,
    pub documents: Vec<VisualDocument>,
}

impl TileContent {
    pub fn get(&self, size: TileSize) -> Option<&VisualDocument> {
        self.documents.iter().find(|d| d.size == size)
    }

    pub fn sizes(&self) -> Vec<TileSize> {
        self.documents.iter().map(|d| d.size).collect()
    }
}
