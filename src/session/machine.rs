use std::{
    collections::{
        BTreeMap,
        HashMap,
        HashSet,
    },
    sync::Arc,
    time::Duration,
};

use chrono::{
    DateTime,
    Utc,
};
use log::{
    debug,
    info,
    warn,
};
use uuid::Uuid;

use super::{
    edit::EditDraft,
    phase::SessionPhase,
    SessionVariant,
};
use crate::{
    backend::{
        GenerationBackend,
        TaggedTopic,
    },
    cache::{
        AudioCache,
        AudioKey,
        ContentCache,
        QuizCache,
    },
    core::{
        models::{
            AudioClip,
            CompletedDay,
            CoursePlan,
            DayContent,
            ExpertiseLevel,
            ModuleTag,
            QuizQuestion,
            SyllabusTopic,
        },
        StudypathError,
    },
    schedule::schedule,
    tasks::{
        TaskManager,
        TaskResult,
    },
};

const DEFAULT_LANGUAGE: &str = "en-US";

/// One user's learning session: the phase machine, the committed plan, the
/// caches and the edit draft, all owned by whoever holds the session (a tab
/// context, a connection handler). Nothing here is a process-wide singleton.
///
/// All mutations are synchronous; network work is delegated to the
/// `TaskManager` and folded back in through `apply`, which discards any
/// response whose key the session no longer expects.
pub struct Session {
    phase: SessionPhase,
    variant: SessionVariant,
    language: String,
    expertise: ExpertiseLevel,
    topic: Option<String>,
    syllabus: Vec<SyllabusTopic>,
    plan: Option<CoursePlan>,
    content: ContentCache,
    audio: AudioCache,
    quiz: QuizCache,
    explanations: HashMap<String, String>,
    pending_explanations: HashSet<String>,
    pending_simplify: HashSet<(u32, usize)>,
    completed: BTreeMap<u32, CompletedDay>,
    draft: Option<EditDraft>,
    message: Option<String>,
    started_at: DateTime<Utc>,
    tasks: TaskManager,
}

impl Session {
    pub fn new(backend: Arc<dyn GenerationBackend>, variant: SessionVariant) -> Self {
        Self {
            phase: SessionPhase::Search,
            variant,
            language: DEFAULT_LANGUAGE.to_string(),
            expertise: ExpertiseLevel::Beginner,
            topic: None,
            syllabus: Vec::new(),
            plan: None,
            content: ContentCache::default(),
            audio: AudioCache::default(),
            quiz: QuizCache::default(),
            explanations: HashMap::new(),
            pending_explanations: HashSet::new(),
            pending_simplify: HashSet::new(),
            completed: BTreeMap::new(),
            draft: None,
            message: None,
            started_at: Utc::now(),
            tasks: TaskManager::new(backend),
        }
    }

    // --- read surface for the presentation layer ---

    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    pub fn variant(&self) -> SessionVariant {
        self.variant
    }

    pub fn plan(&self) -> Option<&CoursePlan> {
        self.plan.as_ref()
    }

    /// Cached content for the day, but only when the entry was generated
    /// for the module the day currently maps to. Day numbers shift under
    /// plan mutations; an entry left over from another module reads as
    /// absent rather than being served.
    pub fn day_content(&self, day: u32) -> Option<&DayContent> {
        let topic = &self.plan.as_ref()?.module_for_day(day)?.topic;
        self.content.get(day, topic)
    }

    pub fn quiz_questions(&self, day: u32) -> Option<&Vec<QuizQuestion>> {
        let topic = &self.plan.as_ref()?.module_for_day(day)?.topic;
        self.quiz.get(day, topic)
    }

    pub fn completed_days(&self) -> impl Iterator<Item = &CompletedDay> {
        self.completed.values()
    }

    pub fn is_day_completed(&self, day: u32) -> bool {
        self.completed.contains_key(&day)
    }

    pub fn draft(&self) -> Option<&EditDraft> {
        self.draft.as_ref()
    }

    pub fn draft_mut(&mut self) -> Option<&mut EditDraft> {
        self.draft.as_mut()
    }

    pub fn explanation(&self, term: &str) -> Option<&str> {
        self.explanations.get(term).map(String::as_str)
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Narration language for audio synthesis. Already-cached clips keep
    /// their old keys; new cards fetch under the new language.
    pub fn set_language(&mut self, language: impl Into<String>) {
        self.language = language.into();
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// One-shot user-facing notice from the last failure, if any.
    pub fn take_message(&mut self) -> Option<String> {
        self.message.take()
    }

    // --- polling ---

    /// Applies every finished background task. Call once per frame/tick.
    pub fn poll(&mut self) -> usize {
        let results = self.tasks.poll_results();
        let count = results.len();
        for result in results {
            self.apply(result);
        }
        count
    }

    /// Blocking variant of `poll` for headless callers: waits up to
    /// `timeout` for the first completion.
    pub fn pump(&mut self, timeout: Duration) -> usize {
        let results = self.tasks.wait_results(timeout);
        let count = results.len();
        for result in results {
            self.apply(result);
        }
        count
    }

    // --- search / syllabus / assessment ---

    pub fn generate(&mut self, topic: &str) {
        if self.phase.is_loading() {
            return;
        }
        let topic = topic.trim().to_string();
        if topic.is_empty() {
            return;
        }

        info!("generating syllabus for '{topic}'");
        self.phase = SessionPhase::Searching { topic: topic.clone() };
        self.tasks.fetch_syllabus(topic, self.expertise);
    }

    /// Flips one syllabus line between needed and not needed on the results
    /// screen, before a plan exists. The `Results` payload is rebuilt from
    /// the session's syllabus, which stays the single source of truth.
    pub fn toggle_syllabus_topic(&mut self, index: usize) {
        let Some(entry) = self.syllabus.get_mut(index) else { return };
        entry.tag = entry.tag.toggled();

        if let SessionPhase::Results { topic, .. } = &self.phase {
            let topic = topic.clone();
            self.phase = SessionPhase::Results { topic, syllabus: self.syllabus.clone() };
        }
    }

    pub fn request_assessment(&mut self) {
        let topic = match &self.phase {
            SessionPhase::Results { topic, .. } => topic.clone(),
            _ => return,
        };

        self.phase = SessionPhase::AssessmentLoading { topic: topic.clone() };
        self.tasks.fetch_assessment(topic);
    }

    /// Grades the assessment locally and moves on to plan generation.
    pub fn submit_assessment(&mut self, answers: &[usize]) {
        let correct_and_total = match &self.phase {
            SessionPhase::Assessment { questions, .. } => {
                let correct = questions
                    .iter()
                    .zip(answers)
                    .filter(|(question, answer)| question.answer_index == **answer)
                    .count();
                Some((correct, questions.len()))
            }
            _ => None,
        };
        let Some((correct, total)) = correct_and_total else { return };

        self.expertise = ExpertiseLevel::from_score(correct, total);
        info!("assessment graded {correct}/{total}, expertise {}", self.expertise.as_str());
        self.start_evaluation();
    }

    /// Skips straight from the results screen to plan generation with the
    /// current expertise level.
    pub fn skip_assessment(&mut self) {
        match self.phase {
            SessionPhase::Results { .. } | SessionPhase::Assessment { .. } => {
                self.start_evaluation()
            }
            _ => {}
        }
    }

    fn start_evaluation(&mut self) {
        let topics: Vec<TaggedTopic> = self
            .syllabus
            .iter()
            .map(|entry| TaggedTopic { topic: entry.topic.clone(), tag: entry.tag })
            .collect();

        self.phase = SessionPhase::Evaluating;
        self.tasks.fetch_plan(topics, self.expertise);
    }

    // --- plan mutations ---

    pub fn toggle_module(&mut self, topic: &str) {
        let Some(plan) = self.plan.as_mut() else { return };
        let Some(module) = plan.modules.iter_mut().find(|m| m.topic == topic) else {
            warn!("toggle for unknown module '{topic}'");
            return;
        };

        module.tag = module.tag.toggled();
        self.reschedule();
    }

    /// Reruns the scheduler over the committed modules and refreshes every
    /// derived field. The one recompute path all plan mutations share.
    fn reschedule(&mut self) {
        let Some(plan) = self.plan.as_mut() else { return };

        let output = schedule(&plan.modules);
        plan.days = output.days;
        plan.day_modules = output.day_modules;
        plan.total_duration_minutes = output.total_duration_minutes;
        self.content.reseed(output.content_seed);

        // The active day may have shifted or vanished; the machine, not the
        // scheduler, is responsible for noticing.
        if let Some(day) = self.phase.active_day() {
            let resolves =
                self.plan.as_ref().map(|plan| plan.day_exists(day)).unwrap_or(false);
            if !resolves {
                info!("day {day} no longer scheduled, returning to overview");
                self.phase = SessionPhase::Overview;
            }
        }
    }

    // --- day navigation ---

    pub fn go_to_day(&mut self, day: u32) {
        if self.phase.is_loading() {
            return;
        }
        let Some(plan) = self.plan.as_ref() else { return };
        if !plan.day_exists(day) {
            self.message = Some(StudypathError::UnknownDay(day).to_string());
            return;
        }
        let Some(module_topic) = plan.module_for_day(day).map(|m| m.topic.clone()) else {
            return;
        };

        if self.content.contains(day, &module_topic) {
            self.phase = SessionPhase::DayCover { day };
            return;
        }

        let course_id = plan.course_id;
        self.phase = SessionPhase::ContentLoading { day };
        if self.content.begin_fetch(day, &module_topic) {
            self.tasks.fetch_module_content(course_id, day, module_topic);
        }
    }

    /// Flashcards require generated content; without it this routes through
    /// `content-loading` first and the review starts once the fetch lands.
    pub fn start_flashcards(&mut self, day: u32) {
        if self.day_content(day).is_some() {
            self.phase = SessionPhase::Flashcards { day, card_index: 0 };
            self.on_card_active(day, 0);
        } else {
            self.go_to_day(day);
        }
    }

    pub fn next_card(&mut self) {
        let (day, index) = match self.phase {
            SessionPhase::Flashcards { day, card_index } => (day, card_index),
            _ => return,
        };
        let Some(total) = self.day_content(day).map(DayContent::len) else { return };

        if index + 1 < total {
            self.phase = SessionPhase::Flashcards { day, card_index: index + 1 };
            self.on_card_active(day, index + 1);
        } else {
            self.finish_flashcards(day);
        }
    }

    /// No-op on the first card.
    pub fn previous_card(&mut self) {
        let (day, index) = match self.phase {
            SessionPhase::Flashcards { day, card_index } => (day, card_index),
            _ => return,
        };
        if index == 0 {
            return;
        }

        self.phase = SessionPhase::Flashcards { day, card_index: index - 1 };
        self.on_card_active(day, index - 1);
    }

    /// Read-ahead for a freshly active card: audio for the next card only
    /// (lookahead depth 1) and, while the last card is still ahead, the
    /// day's quiz. Both are fire-and-forget behind single-flight guards.
    fn on_card_active(&mut self, day: u32, index: usize) {
        let (total, next_text) = match self.day_content(day) {
            Some(content) => (
                content.len(),
                content.flashcards.get(index + 1).map(|card| card.narration_text()),
            ),
            None => return,
        };

        if let Some(text) = next_text {
            let key = AudioKey::new(day, index + 1, self.language.clone());
            if self.audio.begin_fetch(&key) {
                self.tasks.fetch_audio(key, text, true);
            }
        }

        if self.variant.has_quiz() && index + 1 < total {
            let Some(focus_topic) = self.day_topic(day) else { return };
            if self.quiz.begin_fetch(day, &focus_topic) {
                self.tasks.fetch_quiz(day, focus_topic, true);
            }
        }
    }

    fn day_topic(&self, day: u32) -> Option<String> {
        self.plan
            .as_ref()
            .and_then(|plan| plan.module_for_day(day))
            .map(|module| module.topic.clone())
    }

    fn finish_flashcards(&mut self, day: u32) {
        if !self.variant.has_quiz() {
            self.complete_day(day, None);
            return;
        }

        let Some(focus_topic) = self.day_topic(day) else {
            self.phase = SessionPhase::Overview;
            return;
        };

        // Warm cache: straight to the quiz, zero network.
        if let Some(questions) = self.quiz.get(day, &focus_topic).cloned() {
            self.phase = SessionPhase::Quiz { day, questions };
            return;
        }

        self.phase = SessionPhase::QuizLoading { day };
        if self.quiz.begin_fetch(day, &focus_topic) {
            self.tasks.fetch_quiz(day, focus_topic, false);
        }
        // Otherwise the background prefetch is still in flight and its
        // completion moves the machine on.
    }

    pub fn submit_quiz(&mut self, answers: &[usize]) {
        let graded = match &self.phase {
            SessionPhase::Quiz { day, questions } => {
                let correct = questions
                    .iter()
                    .zip(answers)
                    .filter(|(question, answer)| question.answer_index == **answer)
                    .count();
                Some((*day, correct, questions.len()))
            }
            _ => None,
        };
        let Some((day, correct, total)) = graded else { return };

        self.complete_day(day, Some((correct, total)));
    }

    fn complete_day(&mut self, day: u32, score: Option<(usize, usize)>) {
        self.completed.insert(
            day,
            CompletedDay {
                day,
                completed_at: Utc::now(),
                quiz_correct: score.map(|s| s.0),
                quiz_total: score.map(|s| s.1),
            },
        );
        self.phase = SessionPhase::DayComplete { day };
    }

    pub fn proceed_to_next_day(&mut self) {
        let day = match self.phase {
            SessionPhase::DayComplete { day } => day,
            _ => return,
        };
        let total = self.plan.as_ref().map(CoursePlan::total_days).unwrap_or(0);

        if day < total {
            self.go_to_day(day + 1);
        } else {
            info!("course complete after day {day}");
            self.phase = SessionPhase::CourseComplete;
        }
    }

    pub fn back_to_overview(&mut self) {
        if self.plan.is_some() && !self.phase.is_loading() {
            self.phase = SessionPhase::Overview;
        }
    }

    /// The only state-clearing operation: back to the search screen with
    /// every cache, the plan and the draft dropped.
    pub fn restart(&mut self) {
        info!("restarting session");
        self.phase = SessionPhase::Search;
        self.topic = None;
        self.syllabus.clear();
        self.plan = None;
        self.content.clear();
        self.audio.clear();
        self.quiz.clear();
        self.explanations.clear();
        self.pending_explanations.clear();
        self.pending_simplify.clear();
        self.completed.clear();
        self.draft = None;
        self.message = None;
        self.expertise = ExpertiseLevel::Beginner;
        self.started_at = Utc::now();
    }

    // --- audio ---

    /// Foreground fetch for the current card's narration. Returns nothing;
    /// the clip shows up via `current_audio` once the synthesis lands.
    pub fn request_audio(&mut self) {
        let (day, card_index) = match self.phase {
            SessionPhase::Flashcards { day, card_index } => (day, card_index),
            _ => return,
        };
        let Some(text) = self
            .day_content(day)
            .and_then(|content| content.flashcards.get(card_index))
            .map(|card| card.narration_text())
        else {
            return;
        };

        let key = AudioKey::new(day, card_index, self.language.clone());
        if self.audio.begin_fetch(&key) {
            self.tasks.fetch_audio(key, text, false);
        }
    }

    pub fn current_audio(&self) -> Option<&AudioClip> {
        let (day, card_index) = match self.phase {
            SessionPhase::Flashcards { day, card_index } => (day, card_index),
            _ => return None,
        };
        self.audio.get(&AudioKey::new(day, card_index, self.language.clone()))
    }

    /// True when synthesis for the current card failed and the playback
    /// control should render disabled.
    pub fn audio_unavailable(&self) -> bool {
        match self.phase {
            SessionPhase::Flashcards { day, card_index } => self
                .audio
                .is_failed(&AudioKey::new(day, card_index, self.language.clone())),
            _ => false,
        }
    }

    // --- card helpers ---

    /// Local rewrite of one cached flashcard; the plan's subtopics are not
    /// touched.
    pub fn edit_card(
        &mut self,
        day: u32,
        card_index: usize,
        title: Option<String>,
        content: Option<String>,
    ) -> bool {
        self.content.edit_card(day, card_index, title, content)
    }

    pub fn explain_term(&mut self, term: &str) {
        if self.explanations.contains_key(term) {
            return;
        }
        if !self.pending_explanations.insert(term.to_string()) {
            return;
        }

        let context = match self.phase {
            SessionPhase::Flashcards { day, card_index } => self
                .day_content(day)
                .and_then(|content| content.flashcards.get(card_index))
                .map(|card| card.content.clone())
                .unwrap_or_default(),
            _ => self.topic.clone().unwrap_or_default(),
        };
        self.tasks.explain_term(term.to_string(), context);
    }

    pub fn simplify_current_card(&mut self) {
        let (day, card_index) = match self.phase {
            SessionPhase::Flashcards { day, card_index } => (day, card_index),
            _ => return,
        };
        let Some(text) = self
            .day_content(day)
            .and_then(|content| content.flashcards.get(card_index))
            .map(|card| card.content.clone())
        else {
            return;
        };
        if !self.pending_simplify.insert((day, card_index)) {
            return;
        }

        self.tasks.simplify_card(day, card_index, text);
    }

    // --- edit flow ---

    pub fn start_edit(&mut self) {
        if self.draft.is_some() {
            return;
        }
        if let Some(plan) = &self.plan {
            self.draft = Some(EditDraft::from_committed(&plan.modules));
        }
    }

    pub fn cancel_edit(&mut self) {
        self.draft = None;
    }

    /// Atomic commit: the whole draft replaces the module list and the
    /// schedule is re-derived, or nothing changes and the draft survives
    /// for the user to fix.
    pub fn save_edits(&mut self) -> Result<(), StudypathError> {
        let Some(draft) = &self.draft else {
            return Ok(());
        };
        draft.validate()?;

        let modules = draft.modules.clone();
        if let Some(plan) = self.plan.as_mut() {
            plan.modules = modules;
        }
        self.draft = None;
        self.reschedule();
        Ok(())
    }

    // --- task completion ---

    /// Folds one background completion into the session. Every arm first
    /// checks that the response's key is still expected; late arrivals from
    /// phases the user already left are logged and dropped.
    pub fn apply(&mut self, result: TaskResult) {
        debug!("applying task result: {}", result.task_type());
        match result {
            TaskResult::SyllabusLoaded { topic, result } => {
                let expected =
                    matches!(&self.phase, SessionPhase::Searching { topic: t } if *t == topic);
                if !expected {
                    debug!("discarding stale syllabus for '{topic}'");
                    return;
                }
                match result {
                    Ok(response) => {
                        let syllabus: Vec<SyllabusTopic> = response
                            .syllabus
                            .into_iter()
                            .map(|topic| SyllabusTopic { topic, tag: ModuleTag::Needed })
                            .collect();
                        self.topic = Some(response.topic.clone());
                        self.syllabus = syllabus.clone();
                        self.phase = SessionPhase::Results { topic: response.topic, syllabus };
                    }
                    Err(error) => {
                        warn!("syllabus generation failed: {error}");
                        self.message =
                            Some("Couldn't generate a syllabus. Try again.".to_string());
                        self.phase = SessionPhase::Search;
                    }
                }
            }

            TaskResult::AssessmentLoaded { topic, result } => {
                let expected = matches!(
                    &self.phase,
                    SessionPhase::AssessmentLoading { topic: t } if *t == topic
                );
                if !expected {
                    debug!("discarding stale assessment for '{topic}'");
                    return;
                }
                match result {
                    Ok(questions) => {
                        self.phase = SessionPhase::Assessment { topic, questions };
                    }
                    Err(error) => {
                        warn!("assessment generation failed: {error}");
                        self.message =
                            Some("Couldn't prepare the assessment. Try again.".to_string());
                        self.phase = SessionPhase::Results {
                            topic,
                            syllabus: self.syllabus.clone(),
                        };
                    }
                }
            }

            TaskResult::PlanLoaded { result } => {
                if self.phase != SessionPhase::Evaluating {
                    debug!("discarding stale plan result");
                    return;
                }
                match result {
                    Ok(modules) => {
                        let output = schedule(&modules);
                        self.content.reseed(output.content_seed);
                        self.plan = Some(CoursePlan {
                            course_id: Uuid::new_v4(),
                            topic: self.topic.clone().unwrap_or_default(),
                            modules,
                            days: output.days,
                            day_modules: output.day_modules,
                            total_duration_minutes: output.total_duration_minutes,
                        });
                        self.phase = SessionPhase::Overview;
                    }
                    Err(error) => {
                        warn!("plan generation failed: {error}");
                        self.message =
                            Some("Couldn't build a course plan. Try again.".to_string());
                        self.phase = SessionPhase::Search;
                    }
                }
            }

            TaskResult::DayContentLoaded { day, module_topic, result } => {
                if !self.content.accepts(day) {
                    debug!("discarding stale content for day {day}");
                    return;
                }
                // The plan may have been toggled or edited underneath the
                // fetch; only apply if the day still maps to this module.
                let still_matches = self
                    .plan
                    .as_ref()
                    .and_then(|plan| plan.module_for_day(day))
                    .map(|module| module.topic == module_topic)
                    .unwrap_or(false);
                if !still_matches {
                    debug!("day {day} no longer maps to '{module_topic}', dropping content");
                    self.content.fetch_failed(day);
                    if matches!(self.phase, SessionPhase::ContentLoading { day: d } if d == day) {
                        self.phase = SessionPhase::Overview;
                    }
                    return;
                }

                match result {
                    Ok(subtopics) => {
                        self.content.insert(
                            day,
                            module_topic,
                            DayContent::from_subtopics(&subtopics),
                        );
                        // Back-fill the plan so a later reschedule still has
                        // this content, then re-derive the day summaries.
                        if let Some(module) =
                            self.plan.as_mut().and_then(|plan| plan.module_for_day_mut(day))
                        {
                            module.subtopics = subtopics;
                        }
                        self.reschedule();

                        if matches!(
                            self.phase,
                            SessionPhase::ContentLoading { day: d } if d == day
                        ) {
                            self.phase = SessionPhase::Flashcards { day, card_index: 0 };
                            self.on_card_active(day, 0);
                        }
                    }
                    Err(error) => {
                        warn!("content generation failed for day {day}: {error}");
                        self.content.fetch_failed(day);
                        if matches!(
                            self.phase,
                            SessionPhase::ContentLoading { day: d } if d == day
                        ) {
                            self.message = Some(
                                "Couldn't generate content for this module. Try again."
                                    .to_string(),
                            );
                            self.phase = SessionPhase::Overview;
                        }
                    }
                }
            }

            TaskResult::QuizLoaded { day, focus_topic, background, result } => {
                if !self.quiz.accepts(day) {
                    debug!("discarding stale quiz for day {day}");
                    return;
                }
                // Same shift hazard as content: the day may now belong to a
                // different module than the quiz was generated for.
                let still_matches = self
                    .plan
                    .as_ref()
                    .and_then(|plan| plan.module_for_day(day))
                    .map(|module| module.topic == focus_topic)
                    .unwrap_or(false);
                if !still_matches {
                    debug!("day {day} no longer maps to '{focus_topic}', dropping quiz");
                    self.quiz.fetch_failed(day);
                    if matches!(self.phase, SessionPhase::QuizLoading { day: d } if d == day) {
                        self.phase = SessionPhase::Overview;
                    }
                    return;
                }

                match result {
                    Ok(questions) => {
                        self.quiz.insert(day, focus_topic, questions.clone());
                        if matches!(self.phase, SessionPhase::QuizLoading { day: d } if d == day)
                        {
                            self.phase = SessionPhase::Quiz { day, questions };
                        }
                    }
                    Err(error) => {
                        self.quiz.fetch_failed(day);
                        if matches!(self.phase, SessionPhase::QuizLoading { day: d } if d == day)
                        {
                            // Quiz failure is not allowed to strand the day:
                            // it completes without a quiz.
                            warn!("quiz generation failed for day {day}: {error}");
                            self.message = Some(
                                "Quiz unavailable; the day is marked complete.".to_string(),
                            );
                            self.complete_day(day, None);
                        } else if background {
                            debug!("quiz prefetch for day {day} failed: {error}");
                        }
                    }
                }
            }

            TaskResult::AudioLoaded { key, prefetch, result } => {
                if !self.audio.accepts(&key) {
                    debug!("discarding stale audio for {key}");
                    return;
                }
                match result {
                    Ok(clip) => self.audio.insert(key, clip),
                    Err(error) => {
                        self.audio.fetch_failed(&key, !prefetch);
                        if prefetch {
                            debug!("audio prefetch {key} failed: {error}");
                        } else {
                            warn!("audio synthesis {key} failed: {error}");
                        }
                    }
                }
            }

            TaskResult::TermExplained { term, result } => {
                if !self.pending_explanations.remove(&term) {
                    debug!("discarding stale explanation for '{term}'");
                    return;
                }
                match result {
                    Ok(explanation) => {
                        self.explanations.insert(term, explanation);
                    }
                    Err(error) => {
                        warn!("explanation failed for '{term}': {error}");
                        self.message = Some(format!("Couldn't explain '{term}'."));
                    }
                }
            }

            TaskResult::CardSimplified { day, card_index, result } => {
                if !self.pending_simplify.remove(&(day, card_index)) {
                    debug!("discarding stale simplification for day {day} card {card_index}");
                    return;
                }
                match result {
                    // edit_card is its own stale check: it refuses when the
                    // cached card is gone.
                    Ok(text) => {
                        self.content.edit_card(day, card_index, None, Some(text));
                    }
                    Err(error) => {
                        warn!("simplification failed: {error}");
                        self.message = Some("Couldn't simplify this card.".to_string());
                    }
                }
            }
        }
    }
}
