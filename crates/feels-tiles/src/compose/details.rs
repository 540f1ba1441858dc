use feels_weather::Forecast;

use super::{day, ComposeError, DisplayContext};
use crate::document::{
    Group, Image, Subgroup, Text, TextStacking, TextStyle, TileCategory, TileSize, VisualDocument,
};
use crate::{format, icons};

pub(super) fn compose(
    forecast: &Forecast,
    ctx: &DisplayContext,
    size: TileSize,
) -> Result<VisualDocument, ComposeError> {
    let doc = VisualDocument::new(size, TileCategory::CurrentDetails);
    if size == TileSize::Medium {
        medium(doc, forecast)
    } else {
        Ok(doc.group(wide_row(forecast, ctx)))
    }
}

/// Indented bottom-aligned value after a one-part spacer
fn indented(text: Text) -> Group {
    Group::new()
        .subgroup(Subgroup::weighted(1))
        .subgroup(Subgroup::weighted(2).stacking(TextStacking::Bottom).text(text))
}

fn medium(doc: VisualDocument, forecast: &Forecast) -> Result<VisualDocument, ComposeError> {
    let today = day(forecast, 0)?;

    let wind = Group::new()
        .subgroup(Subgroup::weighted(1))
        .subgroup(
            Subgroup::weighted(1)
                .stacking(TextStacking::Bottom)
                .image(Image::icon(icons::WIND_DIRECTION)),
        )
        .subgroup(
            Subgroup::weighted(2).stacking(TextStacking::Bottom).text(
                Text::new(forecast.currently.wind_speed.to_string()).style(TextStyle::Caption),
            ),
        );

    Ok(doc
        .group(indented(
            Text::new(format::temperature(today.temperature_max)).style(TextStyle::Title),
        ))
        .group(indented(
            Text::new(format::temperature(today.temperature_min)).style(TextStyle::TitleSubtle),
        ))
        .group(wind))
}

fn detail(icon: &str, value: String) -> Subgroup {
    Subgroup::weighted(1)
        .image(Image::icon(icon))
        .text(Text::new(value).style(TextStyle::Caption).centered())
}

fn wide_row(forecast: &Forecast, ctx: &DisplayContext) -> Group {
    let now = &forecast.currently;
    Group::new()
        .subgroup(detail(
            icons::PRECIP_PROBABILITY,
            format::percent(now.precip_probability),
        ))
        .subgroup(detail(icons::HUMIDITY, format::percent(now.humidity)))
        .subgroup(detail(icons::CLOUD_COVER, format::percent(now.cloud_cover)))
        .subgroup(detail(
            icons::WIND,
            format::wind_speed(now.wind_speed, ctx.units),
        ))
        .subgroup(detail(
            icons::WIND_DIRECTION,
            format::wind_bearing(now.wind_bearing),
        ))
}

#[cfg(test)]
mod tests {
    use super::super::fixtures;
    use super::*;
    use feels_weather::MeasurementSystem;

    #[test]
    fn medium_shows_raw_range_and_wind() {
        let ctx = DisplayContext::new(fixtures::now());
        let doc = compose(&fixtures::forecast(11, 8), &ctx, TileSize::Medium).unwrap();
        let groups: Vec<_> = doc.groups().collect();
        assert_eq!(groups.len(), 3);

        let texts: Vec<_> = doc.all_texts().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["20°", "8°", "3.5"]);

        let wind_weights: Vec<_> = groups[2].subgroups.iter().map(|s| s.weight).collect();
        assert_eq!(wind_weights, vec![Some(1), Some(1), Some(2)]);
        assert_eq!(doc.image_sources(), vec![icons::WIND_DIRECTION]);
    }

    #[test]
    fn wide_lists_five_details_with_units() {
        let ctx = DisplayContext::new(fixtures::now()).units(MeasurementSystem::Ca);
        let doc = compose(&fixtures::forecast(11, 8), &ctx, TileSize::Wide).unwrap();

        let row = doc.groups().next().unwrap();
        assert_eq!(row.subgroups.len(), 5);
        assert!(row.subgroups.iter().all(|s| s.weight == Some(1)));

        let texts: Vec<_> = doc.all_texts().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["70%", "81%", "95%", "3.5km/h", "230°"]);
        assert_eq!(
            doc.image_sources(),
            vec![
                icons::PRECIP_PROBABILITY,
                icons::HUMIDITY,
                icons::CLOUD_COVER,
                icons::WIND,
                icons::WIND_DIRECTION
            ]
        );
    }

    #[test]
    fn wide_percentages_are_not_thresholded() {
        let mut forecast = fixtures::forecast(11, 8);
        forecast.currently.precip_probability = 0.02;
        let ctx = DisplayContext::new(fixtures::now());
        let doc = compose(&forecast, &ctx, TileSize::Wide).unwrap();
        assert_eq!(doc.all_texts()[0].text, "2%");
    }

    #[test]
    fn medium_needs_today() {
        let ctx = DisplayContext::new(fixtures::now());
        assert_eq!(
            compose(&fixtures::forecast(11, 0), &ctx, TileSize::Medium),
            Err(ComposeError::MissingData {
                series: "daily",
                index: 0
            })
        );
    }
}
