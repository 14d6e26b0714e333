use datadrift_protocol::metric::MetricReport;
use datadrift_protocol::report::{Block, RichText, TextColor};

/// Builds the ordered block sequence of the drift report narrative.
///
/// Pure: the same report always yields the same blocks in the same order,
/// and event order is preserved exactly as detected (baseline included).
/// The timeline embed is omitted when the report carries no chart URL; the
/// caller opts into a chartless report by publishing the blocks anyway.
pub fn assemble_report(report: &MetricReport) -> Vec<Block> {
    let mut blocks = vec![
        Block::heading_1("Problem"),
        Block::paragraph(vec![
            RichText::plain("Why has the "),
            RichText::code(&report.metric_name),
            RichText::plain(format!(
                " changed from {} to {} ?",
                report.first_value, report.last_value
            )),
        ]),
        Block::heading_1("Root Cause Analysis"),
        Block::heading_2("Overview"),
        Block::paragraph(vec![
            RichText::code(&report.metric_name),
            RichText::plain(" initial value was: "),
            RichText::bold(report.first_value.to_string()),
        ]),
        Block::paragraph(vec![
            RichText::code(&report.metric_name),
            RichText::plain(" current value is: "),
            RichText::bold(report.last_value.to_string()),
        ]),
        Block::heading_2("Timeline"),
    ];

    if !report.chart_url.is_empty() {
        blocks.push(Block::embed(&report.chart_url));
    }

    blocks.push(Block::heading_2("Changelog"));

    for event in &report.events {
        let color = if event.diff < 0 {
            TextColor::Orange
        } else {
            TextColor::Blue
        };

        blocks.push(Block::paragraph(vec![RichText::underlined(format!(
            "🗓 Date {}",
            event.date.format("%Y-%m-%d")
        ))]));
        blocks.push(Block::bulleted_list_item(vec![
            RichText::plain("Impact: "),
            RichText::bold_colored(event.diff.to_string(), color),
        ]));
        // Placeholder content, filled by a downstream enrichment step.
        blocks.push(Block::bulleted_list_item(vec![RichText::plain(
            "Explanations: ",
        )]));
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use datadrift_protocol::metric::{ChangeEvent, ChangeTimeline};

    fn day(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2022, 5, day).expect("valid date")
    }

    fn sample_report(chart_url: &str) -> MetricReport {
        MetricReport::new(
            "KPI of mrr",
            ChangeTimeline {
                first_value: 10,
                last_value: 16,
                events: vec![
                    ChangeEvent::baseline(day(26), 10),
                    ChangeEvent::transition(day(27), 10, 16),
                ],
            },
            chart_url,
        )
    }

    fn heading_text(block: &Block) -> Option<String> {
        let rich_text = match block {
            Block::Heading1 { heading_1 } => &heading_1.rich_text,
            Block::Heading2 { heading_2 } => &heading_2.rich_text,
            _ => return None,
        };
        Some(rich_text[0].text.content.clone())
    }

    #[test]
    fn produces_the_fixed_document_skeleton() {
        let blocks = assemble_report(&sample_report("https://charts.example/c/1"));

        let headings: Vec<_> = blocks.iter().filter_map(heading_text).collect();
        assert_eq!(
            headings,
            vec![
                "Problem",
                "Root Cause Analysis",
                "Overview",
                "Timeline",
                "Changelog"
            ]
        );
        assert!(matches!(
            &blocks[7],
            Block::Embed { embed } if embed.url == "https://charts.example/c/1"
        ));
        // Skeleton (9 blocks with the embed) plus three blocks per event.
        assert_eq!(blocks.len(), 9 + 3 * 2);
    }

    #[test]
    fn omits_the_embed_without_a_chart_url() {
        let blocks = assemble_report(&sample_report(""));
        assert!(!blocks.iter().any(|block| matches!(block, Block::Embed { .. })));
        assert_eq!(blocks.len(), 8 + 3 * 2);
    }

    #[test]
    fn each_event_gets_date_impact_and_explanations() {
        let blocks = assemble_report(&sample_report(""));
        // First changelog entry starts right after the "Changelog" heading.
        let entry = &blocks[8..11];

        assert!(matches!(
            &entry[0],
            Block::Paragraph { paragraph }
                if paragraph.rich_text[0].text.content == "🗓 Date 2022-05-26"
        ));
        assert!(matches!(
            &entry[1],
            Block::BulletedListItem { bulleted_list_item }
                if bulleted_list_item.rich_text[0].text.content == "Impact: "
                    && bulleted_list_item.rich_text[1].text.content == "0"
        ));
        assert!(matches!(
            &entry[2],
            Block::BulletedListItem { bulleted_list_item }
                if bulleted_list_item.rich_text[0].text.content == "Explanations: "
        ));
    }

    #[test]
    fn impact_color_tracks_the_diff_sign() {
        let report = MetricReport::new(
            "KPI of mrr",
            ChangeTimeline {
                first_value: 20,
                last_value: 15,
                events: vec![
                    ChangeEvent::baseline(day(26), 20),
                    ChangeEvent::transition(day(27), 20, 15),
                ],
            },
            "",
        );
        let blocks = assemble_report(&report);

        let impact_colors: Vec<_> = blocks
            .iter()
            .filter_map(|block| match block {
                Block::BulletedListItem { bulleted_list_item }
                    if bulleted_list_item.rich_text[0].text.content == "Impact: " =>
                {
                    bulleted_list_item.rich_text[1]
                        .annotations
                        .map(|annotations| annotations.color)
                }
                _ => None,
            })
            .collect();

        assert_eq!(impact_colors, vec![TextColor::Blue, TextColor::Orange]);
    }

    #[test]
    fn assembly_is_pure() {
        let report = sample_report("https://charts.example/c/1");
        assert_eq!(assemble_report(&report), assemble_report(&report));
    }
}
