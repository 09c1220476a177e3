mod connection_resolver_tests;
mod pipeline_tests;
mod skip_include_tests;
mod split_module_import_tests;

use crate::ir::IrBuilder;
use crate::schema::SchemaBuilder;
use crate::store::DocumentStore;
use std::sync::Arc;

pub(super) const TEST_SCHEMA: &str = r#"
scalar JSDependency

interface Node {
  id: ID!
}

type Query {
  me: User
  node(id: ID!): Node
  viewer: Viewer
}

type Mutation {
  updateUser(id: ID!): UpdateUserPayload
}

type UpdateUserPayload {
  user: User
  viewer(token: String): Viewer
}

type Viewer {
  actor: User
  newsFeed: FeedConnection
}

type User implements Node {
  id: ID!
  name: String
  emails: [String]
  nicknames: [String]
  profilePicture: Image
  friendsList: [User!]
  friends(first: Int): FriendsConnection
  nameRenderer(supported: [String!]!): ActorNameRenderer
  plainRenderer(supported: [String!]!): PlainUserNameRenderer
  badRenderer: ActorNameRenderer
}

type Image {
  url: String
  width: Int
}

union ActorNameRenderer = PlainUserNameRenderer | MarkdownUserNameRenderer

type PlainUserNameRenderer {
  plaintext: String
  js(module: String!): JSDependency
}

type MarkdownUserNameRenderer {
  markdown: String
  js(module: String!): JSDependency
}

type OtherRenderer {
  other: String
  js(module: String!): JSDependency
}

type FriendsConnection {
  count: Int
  edges: [FriendsEdge]
  pageInfo: PageInfo
}

type FriendsEdge {
  cursor: String
  node: User
}

type FeedConnection {
  edges: [FeedEdge]
  pageInfo: PageInfo
}

type FeedEdge {
  cursor: String
  node: FeedStory
}

type FeedStory {
  id: ID!
  title: String
}

type PageInfo {
  hasNextPage: Boolean
  endCursor: String
}
"#;

pub(super) fn build_store(schema_sdl: &str, documents: &str) -> DocumentStore {
    let schema = Arc::new(
        SchemaBuilder::from_str(None, schema_sdl)
            .unwrap()
            .build()
            .unwrap(),
    );
    let built = IrBuilder::new(&schema)
        .build_from_str(documents, None)
        .unwrap();
    let mut store = DocumentStore::new(schema);
    for document in built {
        store.insert(document, /* base = */ false).unwrap();
    }
    store
}

pub(super) fn default_test_store(documents: &str) -> DocumentStore {
    build_store(TEST_SCHEMA, documents)
}
