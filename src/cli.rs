//! LDBC Social - Dashboard CLI
//!
//! Terminal client for the gateway. Each subcommand is one dashboard panel.

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use reqwest::Client;
use serde_json::Value;

#[derive(Parser)]
#[command(name = "ldbc")]
#[command(about = "Dashboard CLI for the LDBC social gateway")]
struct Cli {
    /// Gateway URL
    #[arg(long, env = "LDBC_GATEWAY_URL", default_value = "http://localhost:3003")]
    gateway: String,

    /// Print the raw JSON response
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone, Copy)]
struct PageArgs {
    /// Page number (1-based)
    #[arg(long, default_value = "1")]
    page: usize,

    /// Items per page
    #[arg(long, default_value = "10")]
    limit: usize,
}

impl PageArgs {
    fn query(&self) -> [(&'static str, String); 2] {
        [("page", self.page.to_string()), ("limit", self.limit.to_string())]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OrgKind {
    Company,
    University,
    /// Same as university
    Institution,
}

impl OrgKind {
    fn as_str(self) -> &'static str {
        match self {
            OrgKind::Company => "company",
            OrgKind::University => "university",
            OrgKind::Institution => "institution",
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Name of a person
    Person {
        /// Person ID
        id: i64,
    },

    /// Persons living in a city
    ByLocation {
        /// City (place) ID
        place_id: i64,
    },

    /// Persons in a place interested in a tag
    ByLocationTag {
        /// Place ID
        place_id: i64,

        /// Tag ID
        tag_id: i64,

        #[command(flatten)]
        paging: PageArgs,
    },

    /// People a person knows
    Known {
        /// Person ID
        id: i64,

        #[command(flatten)]
        paging: PageArgs,
    },

    /// Friends of friends, ranked by mutual friends
    Fof {
        /// Person ID
        id: i64,

        #[command(flatten)]
        paging: PageArgs,
    },

    /// Average time a person takes to reply to others
    AvgAnswer {
        /// Person ID
        id: i64,
    },

    /// Posts and comments of a creator
    Content {
        /// Creator person ID
        id: i64,

        #[command(flatten)]
        paging: PageArgs,
    },

    /// Members of an organisation with their latest post since joining
    ByOrg {
        /// Organisation type
        #[arg(value_enum)]
        kind: OrgKind,

        /// Organisation ID
        org_id: i64,

        #[command(flatten)]
        paging: PageArgs,
    },

    /// Gateway and service health
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = Client::new();
    let gateway = cli.gateway.trim_end_matches('/');

    let (path, query, render): (String, Vec<(&str, String)>, fn(&Value) -> Vec<String>) =
        match &cli.command {
            Commands::Person { id } => (
                "/person/id".into(),
                vec![("personId", id.to_string())],
                render_person,
            ),
            Commands::ByLocation { place_id } => (
                "/person/byLocation/id".into(),
                vec![("placeId", place_id.to_string())],
                render_person_documents,
            ),
            Commands::ByLocationTag {
                place_id,
                tag_id,
                paging,
            } => (
                format!("/person/byLocation/{}/byTag/{}", place_id, tag_id),
                paging.query().to_vec(),
                render_people_page,
            ),
            Commands::Known { id, paging } => (
                "/person/known/id".into(),
                with_paging(("personId", id.to_string()), paging),
                render_people_page,
            ),
            Commands::Fof { id, paging } => (
                "/person/fof/id".into(),
                with_paging(("personId", id.to_string()), paging),
                render_fof_page,
            ),
            Commands::AvgAnswer { id } => (
                "/comment/avgAnswer/id".into(),
                vec![("personId", id.to_string())],
                render_avg_answer,
            ),
            Commands::Content { id, paging } => (
                "/post/creator/id".into(),
                with_paging(("id", id.to_string()), paging),
                render_content_page,
            ),
            Commands::ByOrg {
                kind,
                org_id,
                paging,
            } => (
                format!("/post/byOrganization/{}/{}", kind.as_str(), org_id),
                paging.query().to_vec(),
                render_org_page,
            ),
            Commands::Health => ("/health".into(), Vec::new(), render_health),
        };

    let body = fetch(&client, &format!("{}{}", gateway, path), &query).await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        for line in render(&body) {
            println!("{}", line);
        }
    }

    Ok(())
}

fn with_paging(first: (&'static str, String), paging: &PageArgs) -> Vec<(&'static str, String)> {
    let mut query = vec![first];
    query.extend(paging.query());
    query
}

/// GET a gateway route; non-2xx responses become an error carrying the server message
async fn fetch(client: &Client, url: &str, query: &[(&str, String)]) -> Result<Value> {
    let resp = client.get(url).query(query).send().await?;
    let status = resp.status();
    let text = resp.text().await?;
    let body: Value = serde_json::from_str(&text).unwrap_or(Value::String(text));

    if !status.is_success() {
        bail!("{} ({})", server_message(&body), status);
    }
    Ok(body)
}

fn server_message(body: &Value) -> String {
    ["message", "error"]
        .iter()
        .find_map(|key| body[*key].as_str())
        .or_else(|| body.as_str())
        .unwrap_or("Request failed")
        .to_string()
}

// ============================================================================
// Rendering
// ============================================================================

fn text<'a>(value: &'a Value, key: &str) -> &'a str {
    value[key].as_str().unwrap_or("-")
}

fn number(value: &Value, key: &str) -> String {
    value[key]
        .as_i64()
        .map_or_else(|| "-".to_string(), |n| n.to_string())
}

fn items(body: &Value) -> &[Value] {
    body["data"].as_array().map_or(&[][..], Vec::as_slice)
}

/// `Page p/N (total T)` footer of a paginated response
fn page_footer(body: &Value) -> Option<String> {
    let pagination = body.get("pagination")?;
    Some(format!(
        "Page {}/{} (total {})",
        pagination["page"].as_u64()?,
        pagination["totalPages"].as_u64()?,
        pagination["total"].as_u64()?
    ))
}

fn with_footer(mut lines: Vec<String>, body: &Value) -> Vec<String> {
    if let Some(footer) = page_footer(body) {
        lines.push(String::new());
        lines.push(footer);
    }
    lines
}

fn render_person(body: &Value) -> Vec<String> {
    vec![format!("{} {}", text(body, "firstName"), text(body, "lastName"))]
}

fn render_person_documents(body: &Value) -> Vec<String> {
    let mut lines = vec![format!("{:<14} {:<16} {:<16} {}", "ID", "FIRST NAME", "LAST NAME", "EMAIL")];
    lines.push("-".repeat(72));
    for person in body.as_array().map_or(&[][..], Vec::as_slice) {
        lines.push(format!(
            "{:<14} {:<16} {:<16} {}",
            number(person, "id"),
            text(person, "firstName"),
            text(person, "lastName"),
            text(person, "email")
        ));
    }
    lines
}

fn render_people_page(body: &Value) -> Vec<String> {
    let mut lines = vec![format!("{:<14} {:<16} {}", "ID", "NAME", "SURNAME")];
    lines.push("-".repeat(50));
    for person in items(body) {
        lines.push(format!(
            "{:<14} {:<16} {}",
            number(person, "id"),
            text(person, "name"),
            text(person, "surname")
        ));
    }
    with_footer(lines, body)
}

fn render_fof_page(body: &Value) -> Vec<String> {
    let mut lines = vec![format!("{:<14} {:<16} {:<16} {}", "ID", "NAME", "SURNAME", "MUTUAL")];
    lines.push("-".repeat(60));
    for person in items(body) {
        lines.push(format!(
            "{:<14} {:<16} {:<16} {}",
            number(person, "id"),
            text(person, "name"),
            text(person, "surname"),
            number(person, "mutualFriends")
        ));
    }
    if let Some(total) = body["totalFoF"].as_i64() {
        lines.push(format!("Friends of friends: {}", total));
    }
    with_footer(lines, body)
}

fn render_avg_answer(body: &Value) -> Vec<String> {
    let Some(seconds) = body["averageReplyTimeSeconds"].as_f64() else {
        return vec!["No reply times could be measured".to_string()];
    };
    let f = &body["formatted"];
    vec![format!(
        "Average reply time: {}d {}h {}m {}s ({:.2} s)",
        f["days"].as_i64().unwrap_or(0),
        f["hours"].as_i64().unwrap_or(0),
        f["minutes"].as_i64().unwrap_or(0),
        f["seconds"].as_i64().unwrap_or(0),
        seconds
    )]
}

fn render_content_page(body: &Value) -> Vec<String> {
    let mut lines = Vec::new();
    for entry in items(body) {
        let creator = &entry["creator"];
        lines.push(format!(
            "Creator: {} {}",
            text(creator, "firstName"),
            text(creator, "lastName")
        ));
        for item in entry["content"].as_array().map_or(&[][..], Vec::as_slice) {
            lines.push(content_line(item));
        }
    }
    with_footer(lines, body)
}

fn content_line(item: &Value) -> String {
    let kind = text(item, "type");
    let head = format!("[{} {}] {}", kind, number(item, "id"), text(item, "creationDate"));
    let body = item["content"].as_str().unwrap_or("(no text)");

    match kind {
        "Post" => format!("{} in \"{}\": {}", head, text(item, "forumTitle"), body),
        _ => {
            let parent = &item["parentPost"];
            match parent["originalId"].as_i64() {
                Some(id) => format!(
                    "{} reply to {} {}: {}",
                    head,
                    text(parent, "originalType"),
                    id,
                    body
                ),
                None => format!("{}: {}", head, body),
            }
        }
    }
}

fn render_org_page(body: &Value) -> Vec<String> {
    let mut lines = Vec::new();
    for member in items(body) {
        lines.push(format!(
            "{} {} {} ({} since {})",
            number(member, "id"),
            text(member, "name"),
            text(member, "surname"),
            text(member, "organizationType"),
            number(member, "since")
        ));
        let posts = member["posts"].as_array().map_or(&[][..], Vec::as_slice);
        if posts.is_empty() {
            lines.push("    no posts since joining".to_string());
        }
        for post in posts {
            lines.push(format!(
                "    [Post {}] {}",
                number(post, "id"),
                post["content"].as_str().unwrap_or("(no text)")
            ));
        }
    }
    with_footer(lines, body)
}

fn render_health(body: &Value) -> Vec<String> {
    let mut lines = vec![format!("Gateway: {}", text(body, "status"))];
    if let Some(services) = body["services"].as_object() {
        for (name, state) in services {
            lines.push(format!("  {:<18} {}", name, state.as_str().unwrap_or("-")));
        }
    }
    lines
}
