use feels_weather::{Forecast, HourPoint};

use super::{hour, ComposeError, DisplayContext};
use crate::document::{
    Group, Image, Subgroup, Text, TextStacking, TextStyle, TileCategory, TileSize, VisualDocument,
};
use crate::{format, icons};

fn entry(point: &HourPoint, ctx: &DisplayContext) -> Subgroup {
    Subgroup::weighted(1)
        .text(
            Text::new(format::hour_label(point.time, ctx.offset()))
                .style(TextStyle::CaptionSubtle)
                .centered(),
        )
        .image(Image::icon(icons::condition_icon(point.icon)))
        .text(
            Text::new(format::temperature(point.apparent_temperature))
                .style(TextStyle::Base)
                .centered(),
        )
}

/// One row of entries for hours `range`; index 0 is the current hour and never shown
fn row(
    forecast: &Forecast,
    ctx: &DisplayContext,
    range: std::ops::RangeInclusive<usize>,
) -> Result<Group, ComposeError> {
    range
        .map(|i| hour(forecast, i).map(|point| entry(point, ctx)))
        .collect()
}

pub(super) fn compose(
    forecast: &Forecast,
    ctx: &DisplayContext,
    size: TileSize,
) -> Result<VisualDocument, ComposeError> {
    let doc = VisualDocument::new(size, TileCategory::Hourly);
    Ok(match size {
        TileSize::Medium => doc.group(row(forecast, ctx, 1..=2)?),
        TileSize::Large => doc
            .stacking(TextStacking::Center)
            .group(row(forecast, ctx, 1..=5)?)
            .text(Text::spacer())
            .group(row(forecast, ctx, 6..=10)?),
        _ => doc.group(row(forecast, ctx, 1..=5)?),
    })
}

#[cfg(test)]
mod tests {
    use super::super::fixtures;
    use super::*;
    use crate::document::Block;

    fn temperatures(group: &Group) -> Vec<String> {
        group
            .subgroups
            .iter()
            .map(|s| s.texts().nth(1).map(|t| t.text.clone()).unwrap_or_default())
            .collect()
    }

    #[test]
    fn medium_shows_next_two_hours() {
        let ctx = DisplayContext::new(fixtures::now());
        let doc = compose(&fixtures::forecast(11, 8), &ctx, TileSize::Medium).unwrap();
        let row = doc.groups().next().unwrap();
        assert_eq!(temperatures(row), vec!["1°", "2°"]);
    }

    #[test]
    fn wide_shows_indices_one_to_five() {
        let ctx = DisplayContext::new(fixtures::now());
        let doc = compose(&fixtures::forecast(11, 8), &ctx, TileSize::Wide).unwrap();
        assert_eq!(doc.groups().count(), 1);
        let row = doc.groups().next().unwrap();
        assert_eq!(row.subgroups.len(), 5);
        assert_eq!(temperatures(row), vec!["1°", "2°", "3°", "4°", "5°"]);
    }

    #[test]
    fn large_has_two_rows_and_spacer() {
        let ctx = DisplayContext::new(fixtures::now());
        let doc = compose(&fixtures::forecast(11, 8), &ctx, TileSize::Large).unwrap();
        assert_eq!(doc.stacking, Some(TextStacking::Center));
        assert!(matches!(&doc.children[1], Block::Text(t) if t.text.is_empty()));

        let rows: Vec<_> = doc.groups().collect();
        assert_eq!(temperatures(rows[0]), vec!["1°", "2°", "3°", "4°", "5°"]);
        assert_eq!(temperatures(rows[1]), vec!["6°", "7°", "8°", "9°", "10°"]);
    }

    #[test]
    fn entries_carry_hour_label_and_plain_icon() {
        let ctx = DisplayContext::new(fixtures::now());
        let doc = compose(&fixtures::forecast(11, 8), &ctx, TileSize::Medium).unwrap();
        let first = &doc.groups().next().unwrap().subgroups[0];
        assert_eq!(first.weight, Some(1));
        // 23:13 local plus one hour
        assert_eq!(first.texts().next().unwrap().text, "12AM");
        assert_eq!(
            first.images().next().unwrap().source,
            "Assets/TileIcons/cloudy.png"
        );
    }
}
