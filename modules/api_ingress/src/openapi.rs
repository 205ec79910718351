use utoipa::openapi::{
    server::Server, ComponentsBuilder, InfoBuilder, OpenApi, OpenApiBuilder, Paths,
};

/// Merge module documents into one, tagged with the API base path as server.
pub fn assemble(parts: Vec<OpenApi>, base_path: &str) -> OpenApi {
    let mut doc = OpenApiBuilder::new()
        .info(
            InfoBuilder::new()
                .title("Chore Chart API")
                .version(env!("CARGO_PKG_VERSION"))
                .description(Some("Users, chores and the assistant tool surface"))
                .build(),
        )
        .paths(Paths::new())
        .components(Some(ComponentsBuilder::new().build()))
        .build();

    for part in parts {
        doc.merge(part);
    }

    let server = if base_path.is_empty() { "/" } else { base_path };
    doc.servers = Some(vec![Server::new(server)]);
    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::openapi::{path::OperationBuilder, HttpMethod, PathItem, PathsBuilder};

    fn part(path: &str) -> OpenApi {
        OpenApiBuilder::new()
            .paths(
                PathsBuilder::new()
                    .path(path, PathItem::new(HttpMethod::Get, OperationBuilder::new().build())),
            )
            .build()
    }

    #[test]
    fn merges_paths_and_sets_server() {
        let doc = assemble(vec![part("/users"), part("/chores")], "/api/v1");
        assert!(doc.paths.paths.contains_key("/users"));
        assert!(doc.paths.paths.contains_key("/chores"));
        let servers = doc.servers.unwrap();
        assert_eq!(servers[0].url, "/api/v1");
    }
}
