use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err) => {
            eprintln!("could not bind the task backend to {addr}: {err}");
            return Err(err);
        }
    };
    println!("in-memory task backend serving http://{addr}/tasks");
    mock_server::run(listener).await
}
