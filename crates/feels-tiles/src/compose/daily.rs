use feels_weather::{DayPoint, Forecast};

use super::{day, ComposeError, DisplayContext};
use crate::document::{
    Group, Image, Subgroup, Text, TextStyle, TileCategory, TileSize, VisualDocument,
};
use crate::{format, icons};

fn entry(point: &DayPoint, ctx: &DisplayContext) -> Subgroup {
    Subgroup::weighted(1)
        .text(
            Text::new(format::weekday_label(point.time, ctx.offset(), ctx.language))
                .style(TextStyle::Caption)
                .centered(),
        )
        .image(Image::icon(icons::condition_icon(point.icon)))
        .text(
            Text::new(format::temperature(point.apparent_temperature_max))
                .style(TextStyle::Caption)
                .centered(),
        )
        .text(
            Text::new(format::temperature(point.apparent_temperature_min))
                .style(TextStyle::CaptionSubtle)
                .centered(),
        )
}

fn row(
    forecast: &Forecast,
    ctx: &DisplayContext,
    range: std::ops::RangeInclusive<usize>,
) -> Result<Group, ComposeError> {
    range
        .map(|i| day(forecast, i).map(|point| entry(point, ctx)))
        .collect()
}

pub(super) fn compose(
    forecast: &Forecast,
    ctx: &DisplayContext,
    size: TileSize,
) -> Result<VisualDocument, ComposeError> {
    let doc = VisualDocument::new(size, TileCategory::Daily);
    Ok(match size {
        TileSize::Medium => doc.group(row(forecast, ctx, 1..=2)?),
        TileSize::Large => doc
            .group(row(forecast, ctx, 1..=4)?)
            .group(row(forecast, ctx, 5..=7)?),
        _ => doc.group(row(forecast, ctx, 1..=5)?),
    })
}

#[cfg(test)]
mod tests {
    use super::super::fixtures;
    use super::*;
    use feels_weather::Language;

    fn maxima(group: &Group) -> Vec<String> {
        group
            .subgroups
            .iter()
            .map(|s| s.texts().nth(1).map(|t| t.text.clone()).unwrap_or_default())
            .collect()
    }

    #[test]
    fn large_splits_four_and_three() {
        let ctx = DisplayContext::new(fixtures::now());
        let doc = compose(&fixtures::forecast(11, 8), &ctx, TileSize::Large).unwrap();
        assert_eq!(doc.children.len(), 2);
        let rows: Vec<_> = doc.groups().collect();
        assert_eq!(maxima(rows[0]), vec!["21°", "22°", "23°", "24°"]);
        assert_eq!(maxima(rows[1]), vec!["25°", "26°", "27°"]);
    }

    #[test]
    fn wide_and_medium_skip_today() {
        let ctx = DisplayContext::new(fixtures::now());
        let forecast = fixtures::forecast(11, 8);
        let wide = compose(&forecast, &ctx, TileSize::Wide).unwrap();
        assert_eq!(
            maxima(wide.groups().next().unwrap()),
            vec!["21°", "22°", "23°", "24°", "25°"]
        );
        let medium = compose(&forecast, &ctx, TileSize::Medium).unwrap();
        assert_eq!(maxima(medium.groups().next().unwrap()), vec!["21°", "22°"]);
    }

    #[test]
    fn entry_layout() {
        let ctx = DisplayContext::new(fixtures::now()).language(Language::English);
        let doc = compose(&fixtures::forecast(11, 8), &ctx, TileSize::Medium).unwrap();
        let first = &doc.groups().next().unwrap().subgroups[0];
        let texts: Vec<_> = first.texts().map(|t| t.text.as_str()).collect();
        // Day 1 is 2023-11-15 23:13 local, a Wednesday
        assert_eq!(texts, vec!["Wed", "21°", "1°"]);
        assert_eq!(first.texts().nth(2).unwrap().style, Some(TextStyle::CaptionSubtle));
        assert_eq!(first.images().next().unwrap().source, "Assets/TileIcons/rain.png");
    }

    #[test]
    fn seven_days_are_required_for_large() {
        let ctx = DisplayContext::new(fixtures::now());
        assert_eq!(
            compose(&fixtures::forecast(11, 7), &ctx, TileSize::Large),
            Err(ComposeError::MissingData {
                series: "daily",
                index: 7
            })
        );
    }
}
