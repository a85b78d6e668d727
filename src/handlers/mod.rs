pub mod chat_handler;
pub mod tools_handler;

use actix_web::web;

pub use chat_handler::{chat, health_check, root, upload_assignment};
pub use tools_handler::{
    generate_flashcards, generate_quiz, solve_assignment, solve_lab_questions, study_helper,
    summarize,
};

/// Registers every route served by the application.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(root)
        .service(health_check)
        .service(chat)
        .service(upload_assignment)
        .service(generate_quiz)
        .service(generate_flashcards)
        .service(summarize)
        .service(solve_assignment)
        .service(solve_lab_questions)
        .service(study_helper);
}
