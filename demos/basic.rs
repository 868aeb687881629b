//! Basic example demonstrating the Harbor API client.
//!
//! Run with:
//! ```
//! cargo run --example basic -- https://harbor.example.com/api admin Harbor12345
//! ```

use harborapi::{HarborClient, ListOptions, ListProjectsOptions, ListRepositoriesOptions};

#[tokio::main]
async fn main() -> harborapi::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let base_url = args
        .next()
        .unwrap_or_else(|| "http://localhost/api".to_string());
    let username = args.next().unwrap_or_default();
    let password = args.next().unwrap_or_default();

    println!("Creating Harbor client...");
    let client = HarborClient::new(&base_url, &username, &password)?;
    println!("Connected to: {}", client.base_url());

    // List first page of projects
    println!("\n--- Listing Projects (first page) ---");
    let options = ListProjectsOptions {
        list: ListOptions::for_page(1, 10),
        ..Default::default()
    };
    let projects = client.projects().list_projects(&options).await?;
    println!("Found {} projects", projects.len());

    for project in projects.iter() {
        println!(
            "  - {} (id {}, {} repos)",
            project.name, project.project_id, project.repo_count
        );
    }

    // Walk the repositories of the first project
    if let Some(first) = projects.first() {
        println!("\n--- Repositories of {} ---", first.name);
        let repositories = client
            .repositories()
            .list_repositories(&ListRepositoriesOptions {
                project_id: Some(first.project_id),
                ..Default::default()
            })
            .await?;

        for repository in repositories.iter() {
            println!("  {} (pulls: {})", repository.name, repository.pull_count);

            let tags = client
                .repositories()
                .list_repository_tags(&repository.name)
                .await?;
            for tag in tags.iter().take(5) {
                println!(
                    "    {} {} signed={}",
                    tag.detail.name, tag.detail.digest, tag.is_signed()
                );
            }
        }
    }

    println!("\nDone!");
    Ok(())
}
