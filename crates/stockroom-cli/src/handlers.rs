//! Command handlers.

use crate::config::{CliConfig, OutputFormat};
use console::style;
use dialoguer::{Confirm, Input, Password, Select};
use std::sync::Arc;
use stockroom_auth::{AuthClient, TokenStore};
use stockroom_client::ApiClient;
use stockroom_core::category::{Category, CategoryCreate, CategoryUpdate};
use stockroom_core::product::{Product, ProductCreate, ProductUpdate};
use stockroom_core::{CategoryId, Error, ProductId};
use stockroom_view::{CacheSet, MutationCoordinator, PagedView, TableView, parse_page};

type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Upper bound when loading the full category list for selection prompts.
const CATEGORY_PICKER_LIMIT: u32 = 1000;

fn authed_client(config: &CliConfig) -> Result<ApiClient, Box<dyn std::error::Error>> {
    let store = TokenStore::open_default()?;
    if !store.is_logged_in() {
        return Err(Error::Unauthorized.into());
    }
    Ok(ApiClient::new(&config.api_url, store.load()))
}

/// Login: exchange credentials for a token and persist it.
pub async fn login(config: &CliConfig) -> CliResult {
    let username: String = Input::new().with_prompt("Username").interact_text()?;
    let password = Password::new().with_prompt("Password").interact()?;

    let auth = AuthClient::new(&config.api_url);
    match auth.login(&username, &password).await {
        Ok(token) => {
            TokenStore::open_default()?.save(&token.access_token)?;
            println!("{} Logged in successfully", style("✓").green());
        }
        Err(err) => {
            // no token is stored on failure
            println!("{} {}", style("✗").red(), err);
        }
    }
    Ok(())
}

/// Logout: clear the stored token.
pub fn logout() -> CliResult {
    let store = TokenStore::open_default()?;
    stockroom_auth::logout(&store)?;
    println!("{} Logged out", style("✓").green());
    Ok(())
}

/// Inventory totals at a glance.
pub async fn dashboard(config: &CliConfig) -> CliResult {
    let client = authed_client(config)?;

    let products = client.list_products(0, 1).await?;
    let categories = client.list_categories(0, 1).await?;

    println!("Inventory at a glance:");
    println!(
        "  Total products:   {}",
        style(products.total_count).bold()
    );
    println!(
        "  Total categories: {}",
        style(categories.total_count).bold()
    );
    Ok(())
}

/// List one page of products.
pub async fn list_products(config: &CliConfig, page: &str) -> CliResult {
    let client = authed_client(config)?;
    let caches = CacheSet::new();
    let mut view = PagedView::new(
        Product::RESOURCE,
        config.product_page_size,
        caches.products.clone(),
    );

    let table = view
        .load(parse_page(page), |skip, limit| {
            client.list_products(skip, limit)
        })
        .await?;
    render_products(config, &table)?;
    Ok(())
}

/// Add a product interactively.
pub async fn add_product(config: &CliConfig) -> CliResult {
    let client = authed_client(config)?;
    let caches = CacheSet::new();

    // categories feed the selection prompt; creation is blocked without one
    let categories = client.list_categories(0, CATEGORY_PICKER_LIMIT).await?;
    if categories.items.is_empty() {
        println!(
            "{} Create at least one category before adding products",
            style("✗").red()
        );
        return Ok(());
    }

    let mut view = PagedView::new(
        Product::RESOURCE,
        config.product_page_size,
        caches.products.clone(),
    );
    let mut coordinator =
        MutationCoordinator::new(Arc::new(caches.clone()), [Product::RESOURCE]);
    let mut draft = ProductCreate::default();
    let mut created = false;

    loop {
        draft = prompt_product(&categories.items, &draft)?;

        let result = {
            let client = &client;
            coordinator
                .submit(draft.clone(), move |payload| async move {
                    client.create_product(&payload).await
                })
                .await
        };

        match result {
            Ok(product) => {
                println!(
                    "{} Product {} created",
                    style("✓").green(),
                    style(&product.name).bold()
                );
                coordinator.reset();
                created = true;
                break;
            }
            Err(err) => {
                // entered values stay in the draft for the next attempt
                println!("{} {}", style("✗").red(), err);
                if !Confirm::new()
                    .with_prompt("Edit the values and try again?")
                    .default(true)
                    .interact()?
                {
                    break;
                }
            }
        }
    }

    if created {
        let table = view
            .load(1, |skip, limit| client.list_products(skip, limit))
            .await?;
        render_products(config, &table)?;
    }
    Ok(())
}

/// Edit a product interactively.
pub async fn edit_product(config: &CliConfig, id: &str) -> CliResult {
    let client = authed_client(config)?;
    let caches = CacheSet::new();
    let product_id: ProductId = id.parse()?;

    let current = client.get_product(product_id).await?;
    let categories = client.list_categories(0, CATEGORY_PICKER_LIMIT).await?;
    if categories.items.is_empty() {
        println!(
            "{} Create at least one category before editing products",
            style("✗").red()
        );
        return Ok(());
    }

    let mut view = PagedView::new(
        Product::RESOURCE,
        config.product_page_size,
        caches.products.clone(),
    );
    let mut coordinator =
        MutationCoordinator::new(Arc::new(caches.clone()), [Product::RESOURCE]);
    let mut draft = product_draft(&current);
    let mut updated = false;

    loop {
        draft = prompt_product(&categories.items, &draft)?;
        let update = product_update(&draft);

        let result = {
            let client = &client;
            coordinator
                .submit(update, move |payload| async move {
                    client.update_product(product_id, &payload).await
                })
                .await
        };

        match result {
            Ok(product) => {
                println!(
                    "{} Product {} updated",
                    style("✓").green(),
                    style(&product.name).bold()
                );
                coordinator.reset();
                updated = true;
                break;
            }
            Err(err) => {
                println!("{} {}", style("✗").red(), err);
                if !Confirm::new()
                    .with_prompt("Edit the values and try again?")
                    .default(true)
                    .interact()?
                {
                    break;
                }
            }
        }
    }

    if updated {
        let table = view
            .load(1, |skip, limit| client.list_products(skip, limit))
            .await?;
        render_products(config, &table)?;
    }
    Ok(())
}

/// Delete a product, then show the refreshed first page.
pub async fn delete_product(config: &CliConfig, id: &str, yes: bool) -> CliResult {
    let client = authed_client(config)?;
    let product_id: ProductId = id.parse()?;

    if !yes
        && !Confirm::new()
            .with_prompt(format!("Delete product {}?", product_id))
            .default(false)
            .interact()?
    {
        println!("{} Cancelled", style("!").yellow());
        return Ok(());
    }

    let caches = CacheSet::new();
    let mut view = PagedView::new(
        Product::RESOURCE,
        config.product_page_size,
        caches.products.clone(),
    );
    let mut coordinator =
        MutationCoordinator::new(Arc::new(caches.clone()), [Product::RESOURCE]);

    {
        let client = &client;
        coordinator
            .submit(product_id, move |pid| async move {
                client.delete_product(pid).await
            })
            .await?;
    }
    println!("{} Product deleted", style("✓").green());

    let table = view
        .load(1, |skip, limit| client.list_products(skip, limit))
        .await?;
    render_products(config, &table)?;
    Ok(())
}

/// List one page of categories.
pub async fn list_categories(config: &CliConfig, page: &str) -> CliResult {
    let client = authed_client(config)?;
    let caches = CacheSet::new();
    let mut view = PagedView::new(
        Category::RESOURCE,
        config.category_page_size,
        caches.categories.clone(),
    );

    let table = view
        .load(parse_page(page), |skip, limit| {
            client.list_categories(skip, limit)
        })
        .await?;
    render_categories(config, &table)?;
    Ok(())
}

/// Add a category interactively.
pub async fn add_category(config: &CliConfig) -> CliResult {
    let client = authed_client(config)?;
    let caches = CacheSet::new();

    let existing = client.list_categories(0, CATEGORY_PICKER_LIMIT).await?;

    // category changes reshape the product views too
    let mut view = PagedView::new(
        Category::RESOURCE,
        config.category_page_size,
        caches.categories.clone(),
    );
    let mut coordinator = MutationCoordinator::new(
        Arc::new(caches.clone()),
        [Category::RESOURCE, Product::RESOURCE],
    );
    let mut draft = CategoryCreate::default();
    let mut created = false;

    loop {
        draft = prompt_category(&existing.items, &draft)?;

        let result = {
            let client = &client;
            coordinator
                .submit(draft.clone(), move |payload| async move {
                    client.create_category(&payload).await
                })
                .await
        };

        match result {
            Ok(category) => {
                println!(
                    "{} Category {} created",
                    style("✓").green(),
                    style(&category.name).bold()
                );
                coordinator.reset();
                created = true;
                break;
            }
            Err(err) => {
                println!("{} {}", style("✗").red(), err);
                if !Confirm::new()
                    .with_prompt("Edit the values and try again?")
                    .default(true)
                    .interact()?
                {
                    break;
                }
            }
        }
    }

    if created {
        let table = view
            .load(1, |skip, limit| client.list_categories(skip, limit))
            .await?;
        render_categories(config, &table)?;
    }
    Ok(())
}

/// Edit a category interactively.
pub async fn edit_category(config: &CliConfig, id: &str) -> CliResult {
    let client = authed_client(config)?;
    let caches = CacheSet::new();
    let category_id: CategoryId = id.parse()?;

    let current = client.get_category(category_id).await?;
    let existing = client.list_categories(0, CATEGORY_PICKER_LIMIT).await?;

    let mut view = PagedView::new(
        Category::RESOURCE,
        config.category_page_size,
        caches.categories.clone(),
    );
    let mut coordinator = MutationCoordinator::new(
        Arc::new(caches.clone()),
        [Category::RESOURCE, Product::RESOURCE],
    );
    let mut draft = CategoryCreate {
        name: current.name.clone(),
        parent_id: current.parent_id,
    };
    let mut updated = false;

    loop {
        draft = prompt_category(&existing.items, &draft)?;
        let update = CategoryUpdate {
            name: Some(draft.name.clone()),
            parent_id: draft.parent_id,
        };

        let result = {
            let client = &client;
            coordinator
                .submit(update, move |payload| async move {
                    client.update_category(category_id, &payload).await
                })
                .await
        };

        match result {
            Ok(category) => {
                println!(
                    "{} Category {} updated",
                    style("✓").green(),
                    style(&category.name).bold()
                );
                coordinator.reset();
                updated = true;
                break;
            }
            Err(err) => {
                println!("{} {}", style("✗").red(), err);
                if !Confirm::new()
                    .with_prompt("Edit the values and try again?")
                    .default(true)
                    .interact()?
                {
                    break;
                }
            }
        }
    }

    if updated {
        let table = view
            .load(1, |skip, limit| client.list_categories(skip, limit))
            .await?;
        render_categories(config, &table)?;
    }
    Ok(())
}

/// Delete a category, then show the refreshed first page.
pub async fn delete_category(config: &CliConfig, id: &str, yes: bool) -> CliResult {
    let client = authed_client(config)?;
    let category_id: CategoryId = id.parse()?;

    if !yes
        && !Confirm::new()
            .with_prompt(format!("Delete category {}?", category_id))
            .default(false)
            .interact()?
    {
        println!("{} Cancelled", style("!").yellow());
        return Ok(());
    }

    let caches = CacheSet::new();
    let mut view = PagedView::new(
        Category::RESOURCE,
        config.category_page_size,
        caches.categories.clone(),
    );
    let mut coordinator = MutationCoordinator::new(
        Arc::new(caches.clone()),
        [Category::RESOURCE, Product::RESOURCE],
    );

    {
        let client = &client;
        coordinator
            .submit(category_id, move |cid| async move {
                client.delete_category(cid).await
            })
            .await?;
    }
    println!("{} Category deleted", style("✓").green());

    let table = view
        .load(1, |skip, limit| client.list_categories(skip, limit))
        .await?;
    render_categories(config, &table)?;
    Ok(())
}

/// Show configuration.
pub fn show_config(config: &CliConfig) -> CliResult {
    println!("Current configuration:");
    println!("  api_url: {}", config.api_url);
    println!("  category_page_size: {}", config.category_page_size);
    println!("  product_page_size: {}", config.product_page_size);
    println!("  output_format: {:?}", config.output_format);

    if let Ok(path) = CliConfig::config_path() {
        println!("\nConfig file: {}", path.display());
    }

    Ok(())
}

/// Set a configuration value.
pub fn set_config(key: &str, value: &str) -> CliResult {
    let mut config = CliConfig::load().unwrap_or_default();
    config.set(key, value)?;
    config.save()?;
    println!("{} {} = {}", style("✓").green(), key, value);
    Ok(())
}

// ---- prompts ----

fn text_prompt(label: &str, initial: &str) -> Result<String, dialoguer::Error> {
    let mut input = Input::<String>::new().with_prompt(label);
    if !initial.is_empty() {
        input = input.with_initial_text(initial);
    }
    input.interact_text()
}

fn optional_prompt(label: &str, initial: Option<&str>) -> Result<Option<String>, dialoguer::Error> {
    let mut input = Input::<String>::new().with_prompt(label).allow_empty(true);
    if let Some(initial) = initial {
        input = input.with_initial_text(initial);
    }
    let value = input.interact_text()?;
    Ok(if value.trim().is_empty() {
        None
    } else {
        Some(value)
    })
}

fn prompt_product(
    categories: &[Category],
    draft: &ProductCreate,
) -> Result<ProductCreate, dialoguer::Error> {
    let name = text_prompt("Name", &draft.name)?;
    let description = optional_prompt("Description (optional)", draft.description.as_deref())?;
    let sku = text_prompt("SKU", &draft.sku)?;
    let price: f64 = Input::new()
        .with_prompt("Price")
        .default(draft.price)
        .interact_text()?;
    let quantity: u32 = Input::new()
        .with_prompt("Quantity")
        .default(draft.quantity)
        .interact_text()?;
    let image_url = optional_prompt("Image URL (optional)", draft.image_url.as_deref())?;
    let in_stock = Confirm::new()
        .with_prompt("In stock?")
        .default(draft.in_stock)
        .interact()?;
    let is_active = Confirm::new()
        .with_prompt("Active?")
        .default(draft.is_active)
        .interact()?;

    let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
    let preselected = categories
        .iter()
        .position(|c| Some(c.id) == draft.category_id)
        .unwrap_or(0);
    let position = Select::new()
        .with_prompt("Category")
        .items(&names)
        .default(preselected)
        .interact()?;

    Ok(ProductCreate {
        name,
        description,
        sku,
        price,
        quantity,
        in_stock,
        image_url,
        is_active,
        category_id: Some(categories[position].id),
    })
}

fn prompt_category(
    existing: &[Category],
    draft: &CategoryCreate,
) -> Result<CategoryCreate, dialoguer::Error> {
    let name = text_prompt("Name", &draft.name)?;

    let mut options = vec!["(none)".to_string()];
    options.extend(existing.iter().map(|c| c.name.clone()));
    let preselected = draft
        .parent_id
        .and_then(|id| existing.iter().position(|c| c.id == id).map(|i| i + 1))
        .unwrap_or(0);
    let position = Select::new()
        .with_prompt("Parent category")
        .items(&options)
        .default(preselected)
        .interact()?;
    let parent_id = (position > 0).then(|| existing[position - 1].id);

    Ok(CategoryCreate { name, parent_id })
}

fn product_draft(product: &Product) -> ProductCreate {
    ProductCreate {
        name: product.name.clone(),
        description: product.description.clone(),
        sku: product.sku.clone(),
        price: product.price,
        quantity: product.quantity,
        in_stock: product.in_stock,
        image_url: product.image_url.clone(),
        is_active: product.is_active,
        category_id: Some(product.category_id),
    }
}

fn product_update(draft: &ProductCreate) -> ProductUpdate {
    ProductUpdate {
        name: Some(draft.name.clone()),
        description: draft.description.clone(),
        sku: Some(draft.sku.clone()),
        price: Some(draft.price),
        quantity: Some(draft.quantity),
        in_stock: Some(draft.in_stock),
        image_url: draft.image_url.clone(),
        is_active: Some(draft.is_active),
        category_id: draft.category_id,
    }
}

// ---- rendering ----

fn render_products(config: &CliConfig, table: &TableView<Product>) -> CliResult {
    if let OutputFormat::Json = config.output_format {
        println!("{}", serde_json::to_string_pretty(&table.items)?);
        return Ok(());
    }

    if let Some(error) = &table.error {
        println!(
            "{} {} (showing last loaded data)",
            style("!").yellow(),
            error
        );
    }

    if table.items.is_empty() {
        println!(
            "{} No products yet. Add a new product to get started",
            style("i").blue()
        );
        return Ok(());
    }

    println!(
        "{:<38} {:<24} {:<14} {:>10} {:>9}  {}",
        "ID", "NAME", "SKU", "PRICE", "QUANTITY", "STATUS"
    );
    for product in &table.items {
        let status = if product.in_stock {
            style("in stock").green()
        } else {
            style("out of stock").red()
        };
        println!(
            "{:<38} {:<24} {:<14} {:>10.2} {:>9}  {}",
            product.id.as_uuid(),
            truncate(&product.name, 24),
            truncate(&product.sku, 14),
            product.price,
            product.quantity,
            status
        );
    }
    print_pagination(table);
    Ok(())
}

fn render_categories(config: &CliConfig, table: &TableView<Category>) -> CliResult {
    if let OutputFormat::Json = config.output_format {
        println!("{}", serde_json::to_string_pretty(&table.items)?);
        return Ok(());
    }

    if let Some(error) = &table.error {
        println!(
            "{} {} (showing last loaded data)",
            style("!").yellow(),
            error
        );
    }

    if table.items.is_empty() {
        println!(
            "{} No categories yet. Add a new category to get started",
            style("i").blue()
        );
        return Ok(());
    }

    println!("{:<38} {:<24} {}", "ID", "NAME", "PARENT");
    for category in &table.items {
        let parent = category
            .parent_id
            .map(|id| id.as_uuid().to_string())
            .unwrap_or_else(|| "N/A".to_string());
        println!(
            "{:<38} {:<24} {}",
            category.id.as_uuid(),
            truncate(&category.name, 24),
            parent
        );
    }
    print_pagination(table);
    Ok(())
}

fn print_pagination<T>(table: &TableView<T>) {
    println!();
    println!(
        "Page {} of {} ({} total)",
        table.page,
        table.page_count.max(1),
        table.total_count
    );

    let mut hints = Vec::new();
    if table.has_prev {
        hints.push(format!("prev: --page {}", table.page - 1));
    }
    if table.has_next {
        hints.push(format!("next: --page {}", table.page + 1));
    }
    if !hints.is_empty() {
        println!("  {}", style(hints.join("  |  ")).dim());
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let mut out: String = text.chars().take(max - 1).collect();
        out.push('…');
        out
    }
}
