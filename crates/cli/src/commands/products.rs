//! Product inspection commands.

use tracing::info;

use tehtehair_storefront::db::ProductRepository;

use super::{CommandError, connect};

/// Log every product, hidden ones included, newest first.
pub async fn list() -> Result<(), CommandError> {
    let pool = connect().await?;
    let products = ProductRepository::new(&pool).list_all().await?;

    if products.is_empty() {
        info!("No products");
        return Ok(());
    }

    info!("Products ({})", products.len());
    for product in &products {
        let visibility = if product.is_hidden { "hidden" } else { "shown" };
        let discount = product.discount_label().unwrap_or_else(|| "-".to_owned());
        info!(
            id = %product.id,
            visibility,
            discount = %discount,
            "{}: {} / {}",
            product.name,
            product.discount_price.display(),
            product.original_price.display(),
        );
    }

    Ok(())
}
