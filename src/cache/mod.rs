pub mod content;
pub mod media;

pub use content::ContentCache;
pub use media::{
    AudioCache,
    AudioKey,
    QuizCache,
};
