use std::collections::HashMap;

#[tokio::main]
async fn main() {
    let raw_args: Vec<String> = std::env::args().skip(1).collect();
    let env: HashMap<String, String> = std::env::vars().collect();

    let code = ionic::run(&raw_args, &env).await;
    std::process::exit(code);
}
