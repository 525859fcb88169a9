//! Assistant subcommand: answer a question against the loaded catalog.

use apteka_storefront::App;

pub async fn run(app: &App, question: &str) {
    if question.trim().is_empty() {
        println!("Ask something, e.g. `apteka ask \"do you have aspirin in stock?\"`");
        return;
    }
    println!("{}", app.ask(question).await);
}
