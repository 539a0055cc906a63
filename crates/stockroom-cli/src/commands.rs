//! CLI command definitions.

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Authenticate and store the access token
    Login,

    /// Clear the stored access token
    Logout,

    /// Inventory totals at a glance
    Dashboard,

    /// Manage products
    Products {
        #[command(subcommand)]
        command: ProductCommands,
    },

    /// Manage categories
    Categories {
        #[command(subcommand)]
        command: CategoryCommands,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ProductCommands {
    /// List products
    List {
        /// Page number
        #[arg(short, long, default_value = "1")]
        page: String,
    },

    /// Add a product
    Add,

    /// Edit a product
    Edit {
        /// Product ID
        id: String,
    },

    /// Delete a product
    Delete {
        /// Product ID
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List categories
    List {
        /// Page number
        #[arg(short, long, default_value = "1")]
        page: String,
    },

    /// Add a category
    Add,

    /// Edit a category
    Edit {
        /// Category ID
        id: String,
    },

    /// Delete a category
    Delete {
        /// Category ID
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set configuration value
    Set {
        /// Key
        key: String,

        /// Value
        value: String,
    },
}
