mod app;
mod commands;
mod plugins;
mod pods;

fn main() {
    let argv: Vec<String> = std::env::args().collect();
    std::process::exit(app::run(argv));
}
