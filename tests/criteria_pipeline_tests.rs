//! End-to-end tests for the criteria pipeline: block config and request
//! parameters feeding handlers, criteria resolved against in-memory
//! backends.

use serde_json::json;
use sift::prelude::*;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("sift=debug")
        .with_test_writer()
        .try_init();
}

fn seeded_repository() -> InMemoryRepository {
    let repository = InMemoryRepository::new(ContentType::new(
        "recipes",
        "rank",
        SortDirection::Ascending,
    ));
    for (id, name, rank) in [
        (1, "Focaccia", 3),
        (2, "Tiramisu", 1),
        (3, "Carbonara", 2),
        (4, "Arancini", 5),
        (5, "Panettone", 6),
        (6, "Ossobuco", 4),
    ] {
        repository
            .insert(
                ContentItem::new(id)
                    .with_field("name", json!(name))
                    .with_field("rank", json!(rank)),
            )
            .unwrap();
    }
    repository
}

fn pipeline() -> (ContentBlockResolver, Context) {
    let repository = seeded_repository();
    let provider = InMemoryTypeProvider::new();
    provider
        .register(ContentType::new("recipes", "rank", SortDirection::Ascending))
        .unwrap();

    let mut registry = RepositoryRegistry::new();
    registry.register("recipes", Arc::new(repository));

    (
        ContentBlockResolver::new(Arc::new(registry), Arc::new(provider)),
        Context::default(),
    )
}

fn block_with_mode(mode: &str) -> Block {
    Block::new("content-type-block").with_config(
        BlockConfig::new()
            .with("mode", mode)
            .with("content_type", "recipes"),
    )
}

fn item_ids(block: &Block) -> Vec<i64> {
    block
        .data
        .get("sItems")
        .unwrap()
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn newest_mode_returns_five_newest() {
    init_tracing();
    let (resolver, context) = pipeline();
    let mut block = block_with_mode("0");

    let prepared = resolver.prepare(&block, &context).await.unwrap();
    assert!(prepared.is_none());
    resolver
        .handle(&mut block, prepared.as_ref(), &context)
        .await
        .unwrap();

    assert_eq!(item_ids(&block), vec![6, 5, 4, 3, 2]);
}

#[tokio::test]
async fn random_mode_returns_a_subset_of_known_items() {
    init_tracing();
    let (resolver, context) = pipeline();
    let mut block = block_with_mode("1");

    resolver.handle(&mut block, None, &context).await.unwrap();

    let ids = item_ids(&block);
    assert_eq!(ids.len(), 5);
    for id in ids {
        assert!((1..=6).contains(&id));
    }
}

#[tokio::test]
async fn selected_mode_filters_listed_ids_dropping_blank_segments() {
    init_tracing();
    let (resolver, context) = pipeline();
    let mut block = block_with_mode("2");
    block.config.set("ids", "1|2||3|");

    resolver.handle(&mut block, None, &context).await.unwrap();

    assert_eq!(item_ids(&block), vec![1, 2, 3]);
}

#[tokio::test]
async fn content_type_mode_sorts_by_type_metadata_after_prepare() {
    init_tracing();
    let (resolver, context) = pipeline();
    let mut block = block_with_mode("3");

    let prepared = resolver.prepare(&block, &context).await.unwrap();
    assert_eq!(
        prepared,
        Some(SortSpec {
            field: "rank".to_string(),
            direction: SortDirection::Ascending,
        })
    );
    resolver
        .handle(&mut block, prepared.as_ref(), &context)
        .await
        .unwrap();

    // rank ascending: Tiramisu(1), Carbonara(2), Focaccia(3), Ossobuco(4), Arancini(5)
    assert_eq!(item_ids(&block), vec![2, 3, 1, 6, 4]);
}

#[tokio::test]
async fn content_type_mode_without_prepare_keeps_storage_order() {
    init_tracing();
    let (resolver, context) = pipeline();
    let mut block = block_with_mode("3");

    resolver.handle(&mut block, None, &context).await.unwrap();

    assert_eq!(item_ids(&block), vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn type_metadata_round_trips_as_plain_attributes() {
    init_tracing();
    let (resolver, context) = pipeline();
    let mut block = block_with_mode("0");

    resolver.handle(&mut block, None, &context).await.unwrap();

    let stype = block.data.get("sType").unwrap().clone();
    let recovered: ContentType = serde_json::from_value(stype).unwrap();
    assert_eq!(
        recovered,
        ContentType::new("recipes", "rank", SortDirection::Ascending)
    );
}

#[tokio::test]
async fn unregistered_content_type_fails_the_block() {
    init_tracing();
    let (resolver, context) = pipeline();
    let mut block = Block::new("content-type-block").with_config(
        BlockConfig::new()
            .with("mode", "0")
            .with("content_type", "banners"),
    );

    let err = resolver.handle(&mut block, None, &context).await.unwrap_err();
    assert!(matches!(
        err,
        SiftError::Config(ConfigError::RepositoryNotRegistered { .. })
    ));
}

#[tokio::test]
async fn variant_handler_composes_with_other_conditions() {
    init_tracing();
    let groups = InMemoryOptionGroups::new();
    groups.insert(5, 10).unwrap();
    groups.insert(6, 10).unwrap();
    groups.insert(7, 20).unwrap();
    let handler = VariantParamHandler::new(Arc::new(groups));

    let mut criteria = Criteria::new();
    criteria.add_condition(Condition::property("status", vec![json!("active")]));

    let request = SearchRequest::new().with_param("options", "5|6|7");
    handler
        .handle_request(&request, &mut criteria, &Context::default())
        .await
        .unwrap();

    assert_eq!(criteria.conditions().len(), 3);
    assert_eq!(
        &criteria.conditions()[1..],
        &[
            Condition::variant(10, vec![5, 6]),
            Condition::variant(20, vec![7]),
        ]
    );
}

#[tokio::test]
async fn variant_handler_empty_and_invalid_inputs_are_noops() {
    init_tracing();
    let groups = InMemoryOptionGroups::new();
    groups.insert(5, 10).unwrap();
    let handler = VariantParamHandler::new(Arc::new(groups));
    let context = Context::default();

    for options in ["", "99", "abc|", "|"] {
        let request = SearchRequest::new().with_param("options", options);
        let mut criteria = Criteria::new();
        handler
            .handle_request(&request, &mut criteria, &context)
            .await
            .unwrap();
        assert!(
            criteria.conditions().is_empty(),
            "options={:?} should add nothing",
            options
        );
    }
}

#[tokio::test]
async fn variant_conditions_execute_and_across_groups() {
    init_tracing();
    let repository = InMemoryRepository::new(ContentType::new(
        "products",
        "id",
        SortDirection::Ascending,
    ));
    repository
        .insert(ContentItem::new(1).with_options(vec![5, 7]))
        .unwrap();
    repository
        .insert(ContentItem::new(2).with_options(vec![6]))
        .unwrap();
    repository
        .insert(ContentItem::new(3).with_options(vec![6, 7]))
        .unwrap();

    let groups = InMemoryOptionGroups::new();
    groups.insert(5, 10).unwrap();
    groups.insert(6, 10).unwrap();
    groups.insert(7, 20).unwrap();
    let handler = VariantParamHandler::new(Arc::new(groups));

    let request = SearchRequest::new().with_param("options", "5|6|7");
    let mut criteria = Criteria::new();
    handler
        .handle_request(&request, &mut criteria, &Context::default())
        .await
        .unwrap();

    let result = repository.find_all(&criteria).await.unwrap();
    let ids: Vec<i64> = result.items.iter().map(|i| i.id).collect();
    // Items must carry an option from group 10 AND one from group 20.
    assert_eq!(ids, vec![1, 3]);
}

#[tokio::test]
async fn translations_hydrate_block_items() {
    init_tracing();
    let repository = seeded_repository();
    let mut fields = serde_json::Map::new();
    fields.insert("name".to_string(), json!("Tiramisù"));
    repository.set_translation(2, fields).unwrap();

    let provider = InMemoryTypeProvider::new();
    provider
        .register(ContentType::new("recipes", "rank", SortDirection::Ascending))
        .unwrap();
    let mut registry = RepositoryRegistry::new();
    registry.register("recipes", Arc::new(repository));
    let resolver = ContentBlockResolver::new(Arc::new(registry), Arc::new(provider));

    let mut block = block_with_mode("2");
    block.config.set("ids", "2");
    resolver
        .handle(&mut block, None, &Context::default())
        .await
        .unwrap();

    let items = block.data.get("sItems").unwrap().as_array().unwrap().clone();
    assert_eq!(items[0]["fields"]["name"], json!("Tiramisù"));
}
