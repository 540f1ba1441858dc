use feels_weather::Forecast;

use super::{
    day, ComposeError, DisplayContext, ICON_WEIGHT, SPACER_WEIGHT, SUMMARY_WEIGHT,
    TEMPERATURE_WEIGHT,
};
use crate::document::{
    Group, Image, Subgroup, Text, TextAlign, TextStacking, TextStyle, TileCategory, TileSize,
    VisualDocument,
};
use crate::{format, icons};

pub(super) fn compose(
    forecast: &Forecast,
    ctx: &DisplayContext,
    size: TileSize,
) -> Result<VisualDocument, ComposeError> {
    let doc = VisualDocument::new(size, TileCategory::Current);
    let temperature = format::temperature(forecast.currently.apparent_temperature);

    let doc = match size {
        TileSize::Small => doc.text(
            Text::new(temperature)
                .style(TextStyle::Subtitle)
                .centered(),
        ),
        TileSize::Medium => medium(doc, forecast, ctx, temperature)?,
        TileSize::Wide => doc
            .stacking(TextStacking::Center)
            .group(summary_row(forecast, ctx, temperature)?),
        TileSize::Large => doc
            .stacking(TextStacking::Center)
            .group(summary_row(forecast, ctx, temperature)?)
            .text(Text::spacer())
            .group(outlook_row(forecast)?),
    };
    Ok(doc)
}

/// Lock screen line: "{town} {now} ({min}/{max}) {summary}"
pub(super) fn detailed_status(
    forecast: &Forecast,
    ctx: &DisplayContext,
) -> Result<String, ComposeError> {
    let today = day(forecast, 0)?;
    Ok(format!(
        "{} {} ({}/{}) {}",
        ctx.town,
        format::temperature(forecast.currently.apparent_temperature),
        format::temperature(today.apparent_temperature_min),
        format::temperature(today.apparent_temperature_max),
        forecast.currently.summary
    ))
}

fn icon(forecast: &Forecast) -> Result<Image, ComposeError> {
    icons::current_icon(forecast)
        .map(Image::icon)
        .ok_or(ComposeError::MissingData {
            series: "daily",
            index: 0,
        })
}

fn medium(
    doc: VisualDocument,
    forecast: &Forecast,
    ctx: &DisplayContext,
    temperature: String,
) -> Result<VisualDocument, ComposeError> {
    Ok(doc
        .text(
            Text::new(ctx.town.to_uppercase())
                .style(TextStyle::Body)
                .centered(),
        )
        .group(
            Group::new()
                .subgroup(Subgroup::weighted(1))
                .subgroup(Subgroup::weighted(2).image(icon(forecast)?))
                .subgroup(Subgroup::weighted(1)),
        )
        .group(
            Group::new()
                .subgroup(
                    Subgroup::new().stacking(TextStacking::Bottom).text(
                        Text::new(temperature)
                            .style(TextStyle::Subtitle)
                            .centered(),
                    ),
                )
                .subgroup(
                    Subgroup::new().stacking(TextStacking::Bottom).text(
                        Text::new(format::clock_time(&ctx.now))
                            .style(TextStyle::CaptionSubtle)
                            .align(TextAlign::Left),
                    ),
                ),
        ))
}

/// Icon, temperature with clock, summary with town
fn summary_row(
    forecast: &Forecast,
    ctx: &DisplayContext,
    temperature: String,
) -> Result<Group, ComposeError> {
    Ok(Group::new()
        .subgroup(Subgroup::weighted(SPACER_WEIGHT))
        .subgroup(
            Subgroup::weighted(ICON_WEIGHT)
                .stacking(TextStacking::Center)
                .image(icon(forecast)?),
        )
        .subgroup(
            Subgroup::weighted(TEMPERATURE_WEIGHT)
                .stacking(TextStacking::Center)
                .text(Text::new(temperature).style(TextStyle::Title))
                .text(Text::new(format::clock_time(&ctx.now)).style(TextStyle::CaptionSubtle)),
        )
        .subgroup(
            Subgroup::weighted(SUMMARY_WEIGHT)
                .stacking(TextStacking::Center)
                .text(Text::new(forecast.currently.summary.clone()).style(TextStyle::Body))
                .text(Text::new(ctx.town.clone()).style(TextStyle::BaseSubtle)),
        ))
}

/// Today's range, wind and precipitation
fn outlook_row(forecast: &Forecast) -> Result<Group, ComposeError> {
    let today = day(forecast, 0)?;
    let currently = &forecast.currently;

    let mut indicators = Subgroup::weighted(15)
        .image(Image::icon(icons::WIND_DIRECTION))
        .text(Text::spacer());
    if let Some(precip) = icons::precipitation_icon(currently.precip_type) {
        indicators = indicators.image(Image::icon(precip));
    }

    Ok(Group::new()
        .subgroup(Subgroup::weighted(10))
        .subgroup(
            Subgroup::weighted(30)
                .text(
                    Text::new(format::temperature(today.apparent_temperature_max))
                        .style(TextStyle::Subtitle),
                )
                .text(
                    Text::new(format::temperature(today.apparent_temperature_min))
                        .style(TextStyle::SubtitleSubtle),
                ),
        )
        .subgroup(indicators)
        .subgroup(Subgroup::weighted(3))
        .subgroup(
            Subgroup::weighted(40)
                .text(Text::new(currently.wind_speed.to_string()).style(TextStyle::Subtitle))
                .text(Text::spacer())
                .text(
                    Text::new(format::precip_probability(currently.precip_probability))
                        .style(TextStyle::Subtitle),
                ),
        ))
}
