use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use content_types::{ContentPath, ContentType, Language, NodeId, NodeKey, PropertyType};
use serde_json::Value;

use crate::traits::{
    ContentNavigation, LanguageDirectory, PublishedContent, PublishedElement, PublishedProperty,
};

/// In-memory language directory for testing.
///
/// Lookups are case-insensitive on the ISO code.
#[derive(Debug, Default)]
pub struct InMemoryLanguageDirectory {
    languages: HashMap<String, Language>,
}

impl InMemoryLanguageDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, language: Language) -> Self {
        self.add(language);
        self
    }

    pub fn add(&mut self, language: Language) {
        self.languages
            .insert(language.iso_code.to_ascii_lowercase(), language);
    }
}

impl LanguageDirectory for InMemoryLanguageDirectory {
    fn language_by_iso_code(&self, iso_code: &str) -> Option<Language> {
        self.languages.get(&iso_code.to_ascii_lowercase()).cloned()
    }

    fn default_language_iso_code(&self) -> Option<String> {
        self.languages
            .values()
            .find(|language| language.is_default)
            .map(|language| language.iso_code.clone())
    }
}

type VariantKey = (Option<String>, Option<String>);

fn variant_key(culture: Option<&str>, segment: Option<&str>) -> VariantKey {
    (
        culture.map(str::to_ascii_lowercase),
        segment.map(str::to_owned),
    )
}

/// Mock property storing values per culture/segment pair.
///
/// `null`, empty strings and empty arrays count as "no value".
#[derive(Clone, Debug)]
pub struct MockProperty {
    property_type: PropertyType,
    values: Arc<HashMap<VariantKey, Value>>,
}

impl MockProperty {
    pub fn new(property_type: PropertyType) -> Self {
        Self {
            property_type,
            values: Arc::new(HashMap::new()),
        }
    }

    pub fn with_value(mut self, culture: Option<&str>, segment: Option<&str>, value: Value) -> Self {
        Arc::make_mut(&mut self.values).insert(variant_key(culture, segment), value);
        self
    }

    /// Invariant value shortcut.
    pub fn with_invariant(self, value: Value) -> Self {
        self.with_value(None, None, value)
    }

    fn stored(&self, culture: Option<&str>, segment: Option<&str>) -> Option<&Value> {
        self.values.get(&variant_key(culture, segment))
    }
}

impl PublishedProperty for MockProperty {
    fn alias(&self) -> &str {
        &self.property_type.alias
    }

    fn property_type(&self) -> &PropertyType {
        &self.property_type
    }

    fn has_value(&self, culture: Option<&str>, segment: Option<&str>) -> bool {
        match self.stored(culture, segment) {
            None | Some(Value::Null) => false,
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(items)) => !items.is_empty(),
            Some(_) => true,
        }
    }

    fn value(&self, culture: Option<&str>, segment: Option<&str>) -> Option<Value> {
        self.stored(culture, segment).cloned()
    }
}

/// Description of a node before it is placed in a [`MockContentTree`].
#[derive(Clone, Debug)]
pub struct MockNode {
    id: NodeId,
    content_type: Arc<ContentType>,
    properties: Vec<MockProperty>,
    published: bool,
}

impl MockNode {
    pub fn new(id: i32, content_type: Arc<ContentType>) -> Self {
        Self {
            id: NodeId(id),
            content_type,
            properties: Vec::new(),
            published: true,
        }
    }

    pub fn with_property(mut self, property: MockProperty) -> Self {
        self.properties.push(property);
        self
    }

    pub fn unpublished(mut self) -> Self {
        self.published = false;
        self
    }
}

#[derive(Debug)]
struct MockContentData {
    id: NodeId,
    key: NodeKey,
    parent: Option<NodeId>,
    path: ContentPath,
    content_type: Arc<ContentType>,
    properties: HashMap<String, MockProperty>,
    published: bool,
}

/// Mock published content node. Clones share the same node.
#[derive(Clone, Debug)]
pub struct MockContent(Arc<MockContentData>);

impl MockContent {
    pub fn parent_id(&self) -> Option<NodeId> {
        self.0.parent
    }

    pub fn is_published(&self) -> bool {
        self.0.published
    }
}

impl PublishedElement for MockContent {
    type Property = MockProperty;

    fn key(&self) -> NodeKey {
        self.0.key
    }

    fn content_type(&self) -> &ContentType {
        &self.0.content_type
    }

    fn property(&self, alias: &str) -> Option<MockProperty> {
        self.0.properties.get(alias).cloned()
    }
}

impl PublishedContent for MockContent {
    fn id(&self) -> NodeId {
        self.0.id
    }

    fn path(&self) -> &str {
        self.0.path.as_str()
    }
}

/// In-memory content tree with published-only navigation.
///
/// Counts `parent` calls so tests can assert whether the tree was walked.
#[derive(Debug)]
pub struct MockContentTree {
    nodes: HashMap<NodeId, MockContent>,
    include_unpublished: bool,
    parent_calls: AtomicUsize,
}

impl MockContentTree {
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            include_unpublished: false,
            parent_calls: AtomicUsize::new(0),
        }
    }

    /// Also navigate to unpublished parents (preview).
    pub fn include_unpublished(mut self, include: bool) -> Self {
        self.include_unpublished = include;
        self
    }

    /// Place a node directly under the tree root.
    pub fn add_root(&mut self, node: MockNode) -> MockContent {
        let path = ContentPath::root().child(node.id);
        self.insert(node, None, path)
    }

    /// Place a node under an existing parent. Returns `None` if the parent
    /// is unknown.
    pub fn add_child(&mut self, parent: NodeId, node: MockNode) -> Option<MockContent> {
        let path = self.nodes.get(&parent)?.0.path.child(node.id);
        Some(self.insert(node, Some(parent), path))
    }

    pub fn get(&self, id: NodeId) -> Option<MockContent> {
        self.nodes.get(&id).cloned()
    }

    pub fn parent_calls(&self) -> usize {
        self.parent_calls.load(Ordering::Relaxed)
    }

    fn insert(&mut self, node: MockNode, parent: Option<NodeId>, path: ContentPath) -> MockContent {
        let properties = node
            .properties
            .into_iter()
            .map(|p| (p.alias().to_owned(), p))
            .collect();
        let content = MockContent(Arc::new(MockContentData {
            id: node.id,
            key: NodeKey::new(),
            parent,
            path,
            content_type: node.content_type,
            properties,
            published: node.published,
        }));
        self.nodes.insert(node.id, content.clone());
        content
    }
}

impl Default for MockContentTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentNavigation<MockContent> for MockContentTree {
    fn parent(&self, content: &MockContent) -> Option<MockContent> {
        self.parent_calls.fetch_add(1, Ordering::Relaxed);
        let parent = self.nodes.get(&content.parent_id()?)?;
        if parent.is_published() || self.include_unpublished {
            Some(parent.clone())
        } else {
            None
        }
    }
}
