use std::{
    sync::{
        mpsc,
        Arc,
    },
    thread,
    time::Duration,
};

use tokio::runtime::Runtime;
use uuid::Uuid;

use super::TaskResult;
use crate::{
    backend::{
        GenerationBackend,
        TaggedTopic,
    },
    cache::AudioKey,
    core::models::ExpertiseLevel,
};

/// Owns the async runtime and the result channel. Every network call the
/// session makes goes through here: a worker thread runs the fetch on the
/// shared runtime and posts a `TaskResult`, which the session applies the
/// next time it polls. The session itself never blocks.
pub struct TaskManager {
    runtime: Arc<Runtime>,
    backend: Arc<dyn GenerationBackend>,
    receiver: mpsc::Receiver<TaskResult>,
    sender: mpsc::Sender<TaskResult>,
}

impl TaskManager {
    pub fn new(backend: Arc<dyn GenerationBackend>) -> Self {
        let runtime = Arc::new(Runtime::new().expect("Failed to create TaskManager runtime"));
        let (sender, receiver) = mpsc::channel();

        Self { runtime, backend, receiver, sender }
    }

    /// Drains every completed task without blocking.
    pub fn poll_results(&mut self) -> Vec<TaskResult> {
        let mut results = Vec::new();

        while let Ok(result) = self.receiver.try_recv() {
            results.push(result);
        }

        results
    }

    /// Blocks up to `timeout` for the next completion, then drains the rest.
    /// For headless callers without a frame loop to poll from.
    pub fn wait_results(&mut self, timeout: Duration) -> Vec<TaskResult> {
        let mut results = Vec::new();

        if let Ok(result) = self.receiver.recv_timeout(timeout) {
            results.push(result);
        }
        results.extend(self.poll_results());

        results
    }

    fn task_context(
        &self,
    ) -> (mpsc::Sender<TaskResult>, Arc<Runtime>, Arc<dyn GenerationBackend>) {
        (self.sender.clone(), self.runtime.clone(), self.backend.clone())
    }

    pub fn fetch_syllabus(&self, topic: String, expertise: ExpertiseLevel) {
        let (sender, runtime, backend) = self.task_context();

        thread::spawn(move || {
            let result = runtime.block_on(async {
                backend.generate_syllabus(&topic, expertise).await.map_err(|e| e.to_string())
            });

            let _ = sender.send(TaskResult::SyllabusLoaded { topic, result });
        });
    }

    pub fn fetch_assessment(&self, topic: String) {
        let (sender, runtime, backend) = self.task_context();

        thread::spawn(move || {
            let result = runtime.block_on(async {
                backend.generate_assessment(&topic).await.map_err(|e| e.to_string())
            });

            let _ = sender.send(TaskResult::AssessmentLoaded { topic, result });
        });
    }

    pub fn fetch_plan(&self, topics: Vec<TaggedTopic>, expertise: ExpertiseLevel) {
        let (sender, runtime, backend) = self.task_context();

        thread::spawn(move || {
            let result = runtime.block_on(async {
                backend.generate_plan(&topics, expertise).await.map_err(|e| e.to_string())
            });

            let _ = sender.send(TaskResult::PlanLoaded { result });
        });
    }

    pub fn fetch_module_content(&self, course_id: Uuid, day: u32, module_topic: String) {
        let (sender, runtime, backend) = self.task_context();

        thread::spawn(move || {
            let result = runtime.block_on(async {
                backend
                    .generate_module_content(course_id, &module_topic)
                    .await
                    .map_err(|e| e.to_string())
            });

            let _ = sender.send(TaskResult::DayContentLoaded { day, module_topic, result });
        });
    }

    pub fn fetch_quiz(&self, day: u32, focus_topic: String, background: bool) {
        let (sender, runtime, backend) = self.task_context();

        thread::spawn(move || {
            let result = runtime.block_on(async {
                backend.generate_quiz(day, &focus_topic).await.map_err(|e| e.to_string())
            });

            let _ = sender.send(TaskResult::QuizLoaded { day, focus_topic, background, result });
        });
    }

    pub fn fetch_audio(&self, key: AudioKey, text: String, prefetch: bool) {
        let (sender, runtime, backend) = self.task_context();

        thread::spawn(move || {
            let result = runtime.block_on(async {
                backend.synthesize_audio(&text, &key.language).await.map_err(|e| e.to_string())
            });

            let _ = sender.send(TaskResult::AudioLoaded { key, prefetch, result });
        });
    }

    pub fn explain_term(&self, term: String, context: String) {
        let (sender, runtime, backend) = self.task_context();

        thread::spawn(move || {
            let result = runtime.block_on(async {
                backend.explain_term(&term, &context).await.map_err(|e| e.to_string())
            });

            let _ = sender.send(TaskResult::TermExplained { term, result });
        });
    }

    pub fn simplify_card(&self, day: u32, card_index: usize, text: String) {
        let (sender, runtime, backend) = self.task_context();

        thread::spawn(move || {
            let result = runtime
                .block_on(async { backend.simplify_content(&text).await.map_err(|e| e.to_string()) });

            let _ = sender.send(TaskResult::CardSimplified { day, card_index, result });
        });
    }
}
