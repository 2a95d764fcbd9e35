use auto_exam::assembly::markup::{ANSWER_LINE_ROW, CHECKBOX_GLYPH, PAGE_BREAK, YES_NO_ROW};
use auto_exam::assembly::{AnswerAffordance, CodeImages};
use auto_exam::models::exam::default_time_allowed;
use auto_exam::{assemble, Block, ExamContext, QuestionFormat, QuestionRecord};

fn record(order: usize, marks: u32, section: u32, format: &str, body: &str) -> QuestionRecord {
    QuestionRecord {
        order_number: order,
        display_number: order.to_string(),
        total_marks: marks,
        body: body.to_string(),
        diagram_markup: String::new(),
        format: QuestionFormat::from(format),
        section,
        choices: String::new(),
    }
}

fn ctx() -> ExamContext {
    ExamContext::new("Biology", "Cells")
}

fn count(blocks: &[Block], wanted: fn(&Block) -> bool) -> usize {
    blocks.iter().filter(|b| wanted(b)).count()
}

#[test]
fn total_marks_is_the_sum_of_record_marks() {
    let marks = [0, 3, 5, 1, 0, 12];
    let records: Vec<QuestionRecord> = marks
        .iter()
        .enumerate()
        .map(|(i, m)| record(i + 1, *m, 1, "long-answer", "q"))
        .collect();

    let result = assemble(&records, &ctx());

    assert_eq!(result.total_marks, marks.iter().map(|m| u64::from(*m)).sum::<u64>());
}

#[test]
fn zero_mark_records_get_no_code_and_no_affordance() {
    let records = [
        record(1, 0, 1, "short-answer", "a"),
        record(2, 0, 1, "boolean", "b"),
        record(3, 0, 1, "multiple-choice", "c"),
    ];

    let result = assemble(&records, &ctx());

    assert!(result.code_payloads().is_empty());
    for question in result.blocks.iter().filter_map(Block::as_question) {
        assert!(question.affordance.is_none());
        assert!(question.marks.is_none());
    }
    let html = result.markup(&CodeImages::new());
    assert!(!html.contains(ANSWER_LINE_ROW));
    assert!(!html.contains(YES_NO_ROW));
    assert!(!html.contains("multiple-choice\">"));
}

#[test]
fn scored_records_get_one_payload_and_scaled_lines() {
    let records = [
        record(1, 1, 1, "short-written", "a"),
        record(2, 3, 1, "long-written", "b"),
        record(3, 4, 1, "short-answer", "c"),
    ];

    let result = assemble(&records, &ctx());

    assert_eq!(
        result.code_payloads(),
        vec!["Biology|Cells|1", "Biology|Cells|2", "Biology|Cells|3"]
    );
    let line_counts: Vec<usize> = result
        .blocks
        .iter()
        .filter_map(Block::as_question)
        .filter_map(|q| match q.affordance {
            Some(AnswerAffordance::Lines { count }) => Some(count),
            _ => None,
        })
        .collect();
    assert_eq!(line_counts, vec![2, 5, 7]);
}

#[test]
fn section_sequence_breaks_and_headings() {
    let records: Vec<QuestionRecord> = [1, 1, 2, 2, 1]
        .iter()
        .enumerate()
        .map(|(i, s)| record(i + 1, 1, *s, "boolean", "q"))
        .collect();

    let result = assemble(&records, &ctx());

    assert_eq!(count(&result.blocks, |b| *b == Block::PageBreak), 2);
    let headings: Vec<u32> = result
        .blocks
        .iter()
        .filter_map(|b| match b {
            Block::SectionHeading { section } => Some(*section),
            _ => None,
        })
        .collect();
    assert_eq!(headings, vec![1, 2, 1]);
    assert_eq!(result.blocks[0], Block::SectionHeading { section: 1 });

    let html = result.markup(&CodeImages::new());
    assert!(!html.starts_with(PAGE_BREAK));
    assert_eq!(html.matches(PAGE_BREAK).count(), 2);
}

#[test]
fn multiple_choice_lists_options_in_order() {
    let mut question = record(1, 1, 1, "multiple-choice", "Which colour?");
    question.choices = "[Red, Green, Blue]".to_string();

    let html = assemble(&[question], &ctx()).markup(&CodeImages::new());

    assert_eq!(html.matches("<li class=\"multiple-choice\">").count(), 3);
    assert_eq!(html.matches(CHECKBOX_GLYPH).count(), 3);
    let positions: Vec<usize> = ["Red</li>", "Green</li>", "Blue</li>"]
        .iter()
        .map(|label| html.find(label).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn malformed_choices_yield_single_empty_option() {
    let question = record(1, 2, 1, "multiple-choice", "Pick");

    let html = assemble(&[question], &ctx()).markup(&CodeImages::new());

    assert_eq!(html.matches("<li class=\"multiple-choice\">").count(), 1);
    assert!(html.contains(&format!("{CHECKBOX_GLYPH}</span></li>")));
}

#[test]
fn boolean_yields_one_yes_no_row_whatever_the_marks() {
    for marks in [1, 2, 10] {
        let html = assemble(&[record(1, marks, 1, "boolean", "True?")], &ctx())
            .markup(&CodeImages::new());
        assert_eq!(html.matches(YES_NO_ROW).count(), 1, "marks = {marks}");
    }
}

#[test]
fn unknown_format_renders_no_affordance() {
    let html = assemble(&[record(1, 5, 1, "essay", "Discuss")], &ctx()).markup(&CodeImages::new());
    assert!(html.contains("[5]"));
    assert!(!html.contains(ANSWER_LINE_ROW));
    assert!(!html.contains(YES_NO_ROW));
    assert!(!html.contains("<ul"));
}

#[test]
fn three_record_scenario() {
    let records = [
        record(1, 0, 1, "other", "Instructions"),
        record(2, 4, 1, "short-answer", "Describe osmosis."),
        record(3, 2, 2, "boolean", "Is a virus alive?"),
    ];

    let result = assemble(&records, &ctx());

    assert_eq!(result.total_marks, 6);
    assert_eq!(default_time_allowed(result.total_marks), 9);
    assert_eq!(ctx().resolved_time_allowed(result.total_marks), "9");

    let heading_styled = result
        .blocks
        .iter()
        .filter_map(Block::as_question)
        .filter(|q| q.heading_style)
        .count();
    assert_eq!(heading_styled, 1);

    let html = result.markup(&CodeImages::new());
    assert_eq!(html.matches(PAGE_BREAK).count(), 1);
    let break_at = html.find(PAGE_BREAK).unwrap();
    let section_two_at = html.find("Section 2</h2>").unwrap();
    assert!(break_at < section_two_at);
    assert_eq!(html.matches("question-heading").count(), 1);
    assert_eq!(html.matches(ANSWER_LINE_ROW).count(), 7);
    assert_eq!(html.matches(YES_NO_ROW).count(), 1);
}

#[test]
fn diagram_follows_answer_area_inside_the_table() {
    let mut written = record(1, 2, 1, "long-written", "Label the cell.");
    written.diagram_markup = "<svg id=\"cell\"></svg>".to_string();
    let mut boolean = record(2, 1, 1, "boolean", "Is this a plant cell?");
    boolean.diagram_markup = "<svg id=\"leaf\"></svg>".to_string();
    let mut choice = record(3, 1, 1, "multiple-choice", "Which part?");
    choice.choices = "[Wall, Membrane]".to_string();
    choice.diagram_markup = "<svg id=\"root\"></svg>".to_string();

    let html = assemble(&[written, boolean, choice], &ctx()).markup(&CodeImages::new());
    let tables: Vec<&str> = html.split("<table").skip(1).collect();
    assert_eq!(tables.len(), 3);

    let cases = [
        (tables[0], ANSWER_LINE_ROW, "<svg id=\"cell\"></svg>"),
        (tables[1], YES_NO_ROW, "<svg id=\"leaf\"></svg>"),
        (tables[2], "</ul></td></tr>", "<svg id=\"root\"></svg>"),
    ];
    for (table, answer_row, diagram) in cases {
        let wrapped = format!("<div class=\"diagram\">{diagram}</div>");
        let answer_at = table.rfind(answer_row).unwrap();
        let diagram_at = table.find(&wrapped).unwrap();
        assert!(answer_at < diagram_at);
        assert!(table.ends_with(&format!("{wrapped}</tbody></table>")));
    }
}
