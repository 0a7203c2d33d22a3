//! Day schedule derivation.
//!
//! The scheduler is a pure function over the module list. It is re-run in
//! full after every toggle, rename or reorder instead of patched
//! incrementally, which keeps day numbering correct by construction.

use std::collections::BTreeMap;

use crate::core::models::{
    DayContent,
    DaySchedule,
    Module,
};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScheduleOutput {
    /// Dense, contiguous day entries over `Needed` modules, in module order.
    pub days: Vec<DaySchedule>,
    /// day number -> index into the module list the day was assigned to.
    pub day_modules: BTreeMap<u32, usize>,
    /// Flashcards, tagged with their module topic, for days whose module
    /// already has generated content.
    pub content_seed: BTreeMap<u32, (String, DayContent)>,
    pub total_duration_minutes: u32,
}

/// Assigns day numbers `1..=count(Needed)` in stored module order. Modules
/// tagged "not needed" are skipped and consume no day number. A needed
/// module with zero subtopics still consumes a day; it just seeds no
/// content.
pub fn schedule(modules: &[Module]) -> ScheduleOutput {
    let mut output = ScheduleOutput::default();
    let mut day: u32 = 1;

    for (index, module) in modules.iter().enumerate() {
        if !module.is_needed() {
            continue;
        }

        output.days.push(DaySchedule {
            day,
            focus_topic: module.topic.clone(),
            summary: summarize(module),
        });
        output.day_modules.insert(day, index);
        output.total_duration_minutes += module.duration_minutes();

        if module.has_content() {
            output.content_seed.insert(
                day,
                (module.topic.clone(), DayContent::from_subtopics(&module.subtopics)),
            );
        }

        day += 1;
    }

    output
}

fn summarize(module: &Module) -> String {
    if module.subtopics.is_empty() {
        return module.topic.clone();
    }
    module.subtopics.iter().map(|s| s.name.as_str()).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{
        ModuleTag,
        Subtopic,
    };

    fn module(topic: &str, tag: ModuleTag, subtopics: &[&str]) -> Module {
        let mut m = Module::new(topic, tag);
        m.subtopics = subtopics.iter().map(|name| Subtopic::named(*name)).collect();
        m
    }

    #[test]
    fn days_are_dense_over_needed_modules() {
        let modules = vec![
            module("A", ModuleTag::Needed, &["a1"]),
            module("B", ModuleTag::NotNeeded, &["b1"]),
            module("C", ModuleTag::Needed, &["c1"]),
        ];

        let output = schedule(&modules);
        assert_eq!(output.days.len(), 2);
        assert_eq!(output.days[0].day, 1);
        assert_eq!(output.days[0].focus_topic, "A");
        assert_eq!(output.days[1].day, 2);
        assert_eq!(output.days[1].focus_topic, "C");
        assert_eq!(output.day_modules[&1], 0);
        assert_eq!(output.day_modules[&2], 2);
    }

    #[test]
    fn toggling_a_module_shifts_later_days() {
        let mut modules = vec![
            module("A", ModuleTag::Needed, &[]),
            module("B", ModuleTag::NotNeeded, &[]),
            module("C", ModuleTag::Needed, &[]),
        ];

        modules[1].tag = modules[1].tag.toggled();
        let output = schedule(&modules);
        let topics: Vec<&str> = output.days.iter().map(|d| d.focus_topic.as_str()).collect();
        assert_eq!(topics, ["A", "B", "C"]);
        assert_eq!(output.days.iter().map(|d| d.day).collect::<Vec<_>>(), [1, 2, 3]);
    }

    #[test]
    fn double_toggle_restores_original_schedule() {
        let mut modules: Vec<Module> = (0..5)
            .map(|i| module(&format!("M{i}"), ModuleTag::Needed, &["s"]))
            .collect();
        let original = schedule(&modules);

        modules[1].tag = modules[1].tag.toggled();
        let without = schedule(&modules);
        assert_eq!(without.days.len(), 4);
        // Removing module 2 of 5 shifts modules 3-5 down by one day.
        assert_eq!(without.days[1].focus_topic, "M2");
        assert_eq!(without.days[1].day, 2);

        modules[1].tag = modules[1].tag.toggled();
        assert_eq!(schedule(&modules), original);
    }

    #[test]
    fn schedule_is_idempotent() {
        let modules = vec![
            module("A", ModuleTag::Needed, &["a1", "a2"]),
            module("B", ModuleTag::Needed, &[]),
        ];
        assert_eq!(schedule(&modules), schedule(&modules));
    }

    #[test]
    fn zero_subtopic_module_still_consumes_a_day() {
        let modules = vec![
            module("Empty", ModuleTag::Needed, &[]),
            module("Full", ModuleTag::Needed, &["x"]),
        ];

        let output = schedule(&modules);
        assert_eq!(output.days.len(), 2);
        assert!(!output.content_seed.contains_key(&1));
    }

    #[test]
    fn content_seed_flattens_subtopics_into_flashcards() {
        let mut m = module("A", ModuleTag::Needed, &[]);
        m.subtopics = vec![
            Subtopic {
                name: "First".to_string(),
                content_points: vec!["p1".to_string(), "p2".to_string()],
                duration_minutes: 5,
                audio_script: Some("script".to_string()),
                reference: None,
            },
            Subtopic::named("Second"),
        ];

        let output = schedule(&[m]);
        let (topic, content) = &output.content_seed[&1];
        assert_eq!(topic, "A");
        assert_eq!(content.len(), 2);
        assert_eq!(content.flashcards[0].title, "First");
        assert_eq!(content.flashcards[0].content, "p1\np2");
        assert_eq!(content.flashcards[1].title, "Second");
        assert_eq!(output.total_duration_minutes, 5);
    }

    #[test]
    fn not_needed_modules_contribute_no_duration() {
        let mut a = module("A", ModuleTag::Needed, &[]);
        a.subtopics = vec![Subtopic { duration_minutes: 10, ..Subtopic::named("x") }];
        let mut b = module("B", ModuleTag::NotNeeded, &[]);
        b.subtopics = vec![Subtopic { duration_minutes: 99, ..Subtopic::named("y") }];

        assert_eq!(schedule(&[a, b]).total_duration_minutes, 10);
    }
}
