use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::domain::Task;

/// Start of a task block: `TASK <n>:` at the beginning of a line, followed by
/// its `Title:` label. A description line such as `Task 2: do this first` is
/// not a header.
static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^[ \t]*(TASK[ \t]+\d+[ \t]*:)\s*Title:").expect("Invalid task header regex")
});

/// The six fields of one block, in order. Applied to a single block's text,
/// which runs from its header up to the next header or the end of the reply.
static BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)\ATASK\s+(?P<order>\d+)\s*:\s*Title:[ \t]*(?P<title>.+?)\s*\n\s*Description:[ \t]*(?P<description>.+?)\s*\n\s*Priority:[ \t]*(?P<priority>.+?)\s*\n\s*Estimate:[ \t]*(?P<estimate>\d+)[ \t]*hours?\b[^\n]*\n\s*Dependencies:(?P<dependencies>.*)\z",
    )
    .expect("Invalid task block regex")
});

/// Values meaning "no dependencies", compared case-insensitively.
const NO_DEPENDENCIES: &[&str] = &["none", "nenhuma"];

/// Turns the model's free-text reply back into [`Task`]s.
///
/// Never fails. When no block in the reply matches the expected format a
/// single fallback task carrying the whole reply is returned instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseParser;

impl ResponseParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse `raw` into at least one task.
    pub fn parse(&self, raw: &str) -> Vec<Task> {
        let tasks = self.extract(raw);
        if tasks.is_empty() {
            warn!("Could not parse structured response. Returning raw response.");
            return vec![Task::fallback(raw)];
        }
        tasks
    }

    /// Every well-formed block in order of appearance. May be empty.
    ///
    /// Order numbers are kept as written, duplicates included, and
    /// dependencies are not checked against the other tasks.
    pub fn extract(&self, raw: &str) -> Vec<Task> {
        let starts: Vec<usize> = HEADER_RE
            .captures_iter(raw)
            .filter_map(|c| c.get(1).map(|m| m.start()))
            .collect();

        let mut tasks = Vec::with_capacity(starts.len());
        for (i, &start) in starts.iter().enumerate() {
            let end = starts.get(i + 1).copied().unwrap_or(raw.len());
            let block = &raw[start..end];
            match Self::parse_block(block) {
                Some(task) => tasks.push(task),
                None => debug!("Skipping malformed task block: {:?}", first_line(block)),
            }
        }
        tasks
    }

    fn parse_block(block: &str) -> Option<Task> {
        let caps = BLOCK_RE.captures(block)?;

        // Digits that overflow are treated like any other unmatched block.
        let order = caps["order"].parse::<u32>().ok()?;
        let estimated_hours = caps["estimate"].parse::<u32>().ok()?;

        let dependencies_field = dependency_lines(&caps["dependencies"]);

        Some(Task::new(
            order,
            caps["title"].trim(),
            caps["description"].trim(),
            caps["priority"].trim().to_lowercase(),
            estimated_hours,
            parse_dependencies(dependencies_field),
        ))
    }
}

/// Split a `Dependencies:` value on commas and semicolons.
///
/// An empty value or one of [`NO_DEPENDENCIES`] yields an empty list. Tokens
/// are opaque strings.
pub fn parse_dependencies(field: &str) -> Vec<String> {
    let field = field.trim();
    if field.is_empty()
        || NO_DEPENDENCIES
            .iter()
            .any(|none| field.eq_ignore_ascii_case(none))
    {
        return Vec::new();
    }

    field
        .split([',', ';'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// The lines of a `Dependencies:` value. The list ends with its first line
/// unless that line ends in a separator, so closing prose from the model is
/// left out.
fn dependency_lines(field: &str) -> &str {
    let mut end = 0;
    let mut seen_value = false;
    for line in field.split_inclusive('\n') {
        end += line.len();
        let trimmed = line.trim();
        if trimmed.is_empty() {
            if seen_value {
                break;
            }
            continue;
        }
        seen_value = true;
        if !(trimmed.ends_with(',') || trimmed.ends_with(';')) {
            break;
        }
    }
    &field[..end]
}

fn first_line(block: &str) -> &str {
    block.lines().next().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_TASKS: &str = "TASK 1:
Title: Define scope
Description: Gather requirements
Priority: high
Estimate: 4 hours
Dependencies: none

TASK 2:
Title: Build prototype
Description: Implement MVP
Priority: medium
Estimate: 20 hours
Dependencies: 1
";

    fn assert_fallback(tasks: &[Task], raw: &str) {
        assert_eq!(tasks.len(), 1);
        let task = &tasks[0];
        assert_eq!(task.order(), 1);
        assert_eq!(task.title(), "Generated Tasks");
        assert_eq!(task.description(), raw);
        assert_eq!(task.priority(), "medium");
        assert_eq!(task.estimated_hours(), 0);
        assert!(task.dependencies().is_empty());
    }

    #[test]
    fn parses_well_formed_blocks_in_order() {
        let tasks = ResponseParser::new().parse(TWO_TASKS);
        assert_eq!(tasks.len(), 2);

        assert_eq!(tasks[0].order(), 1);
        assert_eq!(tasks[0].title(), "Define scope");
        assert_eq!(tasks[0].description(), "Gather requirements");
        assert_eq!(tasks[0].priority(), "high");
        assert_eq!(tasks[0].estimated_hours(), 4);
        assert!(tasks[0].dependencies().is_empty());

        assert_eq!(tasks[1].order(), 2);
        assert_eq!(tasks[1].title(), "Build prototype");
        assert_eq!(tasks[1].priority(), "medium");
        assert_eq!(tasks[1].estimated_hours(), 20);
        assert_eq!(tasks[1].dependencies(), ["1".to_string()]);
    }

    #[test]
    fn empty_input_falls_back() {
        assert_fallback(&ResponseParser::new().parse(""), "");
    }

    #[test]
    fn unstructured_input_falls_back() {
        let raw = "random unstructured text";
        assert_fallback(&ResponseParser::new().parse(raw), raw);
    }

    #[test]
    fn reparsing_fallback_description_is_stable() {
        let parser = ResponseParser::new();
        let raw = "Here is a plan:\n1. Do this\n2. Do that";
        let first = parser.parse(raw);
        let second = parser.parse(first[0].description());
        assert_eq!(first, second);
    }

    #[test]
    fn non_numeric_estimate_skips_block() {
        let raw = TWO_TASKS.replace("Estimate: 4 hours", "Estimate: a few hours");
        let tasks = ResponseParser::new().parse(&raw);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title(), "Build prototype");
    }

    #[test]
    fn only_block_with_non_numeric_estimate_falls_back() {
        let raw = "TASK 1:
Title: Plan
Description: Think
Priority: high
Estimate: a few hours
Dependencies: none";
        assert_fallback(&ResponseParser::new().parse(raw), raw);
    }

    #[test]
    fn fields_out_of_order_are_not_matched() {
        let raw = "TASK 1:
Description: Think
Title: Plan
Priority: high
Estimate: 2 hours
Dependencies: none";
        assert_fallback(&ResponseParser::new().parse(raw), raw);
    }

    #[test]
    fn labels_are_case_insensitive_and_whitespace_tolerant() {
        let raw = "task   7 :
  title:   Write tests
  DESCRIPTION:  Cover the parser
  priority:  HIGH
  estimate: 3 Hour
  dependencies:  1 ; 2
";
        let tasks = ResponseParser::new().parse(raw);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].order(), 7);
        assert_eq!(tasks[0].title(), "Write tests");
        assert_eq!(tasks[0].description(), "Cover the parser");
        assert_eq!(tasks[0].priority(), "high");
        assert_eq!(tasks[0].estimated_hours(), 3);
        assert_eq!(tasks[0].dependencies(), ["1".to_string(), "2".to_string()]);
    }

    #[test]
    fn multi_line_description_is_kept() {
        let raw = "TASK 1:
Title: Design schema
Description: Model the entities.
Cover orders and users.
Priority: low
Estimate: 6 hours
Dependencies: none";
        let tasks = ResponseParser::new().parse(raw);
        assert_eq!(tasks.len(), 1);
        assert_eq!(
            tasks[0].description(),
            "Model the entities.\nCover orders and users."
        );
    }

    #[test]
    fn duplicate_and_out_of_sequence_orders_are_preserved() {
        let raw = "TASK 3:
Title: C
Description: c
Priority: low
Estimate: 1 hours
Dependencies: 9

TASK 3:
Title: C again
Description: c
Priority: low
Estimate: 1 hours
Dependencies: none

TASK 1:
Title: A
Description: a
Priority: low
Estimate: 1 hours
Dependencies: none";
        let tasks = ResponseParser::new().parse(raw);
        let orders: Vec<u32> = tasks.iter().map(Task::order).collect();
        assert_eq!(orders, vec![3, 3, 1]);
        // References to tasks that do not exist are accepted as-is.
        assert_eq!(tasks[0].dependencies(), ["9".to_string()]);
    }

    #[test]
    fn unexpected_priority_is_passed_through_lower_cased() {
        let raw = "TASK 1:
Title: A
Description: a
Priority: URGENT
Estimate: 1 hours
Dependencies: none";
        let tasks = ResponseParser::new().parse(raw);
        assert_eq!(tasks[0].priority(), "urgent");
    }

    #[test]
    fn surrounding_prose_is_ignored() {
        let raw = format!("Sure! Here is your plan.\n\n{TWO_TASKS}\nLet me know if you need more detail.");
        let tasks = ResponseParser::new().parse(&raw);
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[1].dependencies(), ["1".to_string()]);
    }

    #[test]
    fn task_mention_inside_a_line_is_not_a_header() {
        let raw = "TASK 1:
Title: Review
Description: Re-check the output of TASK 2: it must compile
Priority: high
Estimate: 2 hours
Dependencies: none";
        let tasks = ResponseParser::new().parse(raw);
        assert_eq!(tasks.len(), 1);
        assert!(tasks[0].description().contains("TASK 2: it must compile"));
    }

    #[test]
    fn description_line_starting_with_task_label_stays_in_block() {
        let raw = "TASK 1:
Title: A
Description: Set up the repository.
Task 2: must be done first
Priority: high
Estimate: 2 hours
Dependencies: none

TASK 2:
Title: B
Description: b
Priority: low
Estimate: 1 hours
Dependencies: 1";
        let tasks = ResponseParser::new().parse(raw);
        let titles: Vec<&str> = tasks.iter().map(Task::title).collect();
        assert_eq!(titles, vec!["A", "B"]);
        assert_eq!(
            tasks[0].description(),
            "Set up the repository.\nTask 2: must be done first"
        );
        assert_eq!(tasks[1].dependencies(), ["1".to_string()]);
    }

    #[test]
    fn closing_prose_after_dependencies_is_ignored() {
        let raw = "TASK 1:
Title: A
Description: a
Priority: high
Estimate: 2 hours
Dependencies: none
Let me know if you need more.";
        let tasks = ResponseParser::new().parse(raw);
        assert_eq!(tasks.len(), 1);
        assert!(tasks[0].dependencies().is_empty());

        let raw = raw.replace("Dependencies: none", "Dependencies: 1, 2");
        let tasks = ResponseParser::new().parse(&raw);
        assert_eq!(tasks[0].dependencies(), ["1".to_string(), "2".to_string()]);
    }

    #[test]
    fn dependency_list_continues_after_trailing_separator() {
        let raw = "TASK 3:
Title: C
Description: c
Priority: low
Estimate: 1 hours
Dependencies: 1,
2
Thanks!";
        let tasks = ResponseParser::new().parse(raw);
        assert_eq!(tasks[0].dependencies(), ["1".to_string(), "2".to_string()]);
    }

    #[test]
    fn windows_line_endings_are_accepted() {
        let raw = TWO_TASKS
            .replace("Dependencies: 1\n", "Dependencies: 1; 2\n")
            .replace('\n', "\r\n");
        let tasks = ResponseParser::new().parse(&raw);
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].title(), "Define scope");
        assert_eq!(tasks[0].description(), "Gather requirements");
        assert_eq!(tasks[0].priority(), "high");
        assert!(tasks[0].dependencies().is_empty());
        assert_eq!(tasks[1].estimated_hours(), 20);
        assert_eq!(tasks[1].dependencies(), ["1".to_string(), "2".to_string()]);
    }

    #[test]
    fn extract_returns_empty_without_fallback() {
        assert!(ResponseParser::new().extract("nothing here").is_empty());
    }

    #[test]
    fn dependency_tokenization() {
        assert_eq!(parse_dependencies("1, 2; 3"), vec!["1", "2", "3"]);
        assert_eq!(parse_dependencies(" 1 ,, 2 "), vec!["1", "2"]);
        assert!(parse_dependencies("none").is_empty());
        assert!(parse_dependencies("NONE").is_empty());
        assert!(parse_dependencies("Nenhuma").is_empty());
        assert!(parse_dependencies("   ").is_empty());
        assert_eq!(parse_dependencies("Task 1"), vec!["Task 1"]);
    }
}
