use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use medinear::auth::{LoginCredentials, RegisterForm};
use medinear::browser::{BrowserView, Resource, ResourceBrowser, ResourceSource, SearchRadius};
use medinear::config::ClientOptions;
use medinear::error::FormError;
use medinear::hospitals::Hospital;
use medinear::owner::{MedicineDraft, OwnedResource, OwnerDashboard, OwnerState};
use medinear::shops::MedicalShop;
use medinear::{Error, MediNear, Result};
use medinear_geolocation::{Coordinates, FixedLocation, LocationProvider};
use medinear_session::{FileStorage, History, Role};

const DEFAULT_SESSION_FILE: &str = ".medinear-session.json";

#[derive(Parser, Debug)]
#[clap(name = "medinear", version)]
#[clap(about = "Find medical shops and hospitals near you", long_about = None)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,

    /// Backend base URL, including the /api prefix
    #[clap(long, env = "MEDINEAR_API_URL")]
    api_url: Option<String>,

    /// File the session token is kept in between runs
    #[clap(long, env = "MEDINEAR_SESSION_FILE")]
    session_file: Option<PathBuf>,

    /// Output debug logs to stderr
    #[clap(long)]
    debug: bool,
}

/// Where the device is, for commands that need a location
#[derive(clap::Args, Debug)]
struct LocationArgs {
    #[clap(long, requires = "lng", allow_hyphen_values = true)]
    lat: Option<f64>,

    #[clap(long, requires = "lat", allow_hyphen_values = true)]
    lng: Option<f64>,
}

impl LocationArgs {
    fn provider(&self) -> Option<Arc<dyn LocationProvider>> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => {
                let provider: Arc<dyn LocationProvider> =
                    Arc::new(FixedLocation::new(Coordinates::new(lng, lat)));
                Some(provider)
            }
            _ => None,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create an account
    Register {
        #[clap(long)]
        name: String,
        #[clap(long)]
        email: String,
        #[clap(long)]
        password: String,
        /// Defaults to --password
        #[clap(long)]
        confirm_password: Option<String>,
        #[clap(long, default_value = "")]
        phone: String,
        #[clap(long, default_value = "")]
        address: String,
        /// user, medical_shop_owner or hospital_owner
        #[clap(long, default_value = "user")]
        role: Role,
        #[clap(flatten)]
        location: LocationArgs,
    },
    /// Sign in
    Login {
        #[clap(long)]
        email: String,
        #[clap(long)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in user
    Me,
    /// List medical shops, nearby when a location is given
    Shops {
        #[clap(flatten)]
        location: LocationArgs,
        /// Search radius in km (5, 10, 20 or 50)
        #[clap(long, default_value = "10")]
        radius: u32,
        /// Show the details of one shop
        #[clap(long)]
        select: Option<String>,
    },
    /// List hospitals, nearby when a location is given
    Hospitals {
        #[clap(flatten)]
        location: LocationArgs,
        #[clap(long, default_value = "10")]
        radius: u32,
        #[clap(long)]
        select: Option<String>,
    },
    /// Show the shop or hospital owned by the signed-in user
    MyResource,
    /// Add a medicine to the signed-in owner's shop
    AddMedicine {
        #[clap(long)]
        name: String,
        #[clap(long)]
        price: String,
        #[clap(long)]
        stock: String,
        #[clap(long, default_value = "")]
        description: String,
        #[clap(long, default_value = "")]
        manufacturer: String,
    },
}

impl Commands {
    fn provider(&self) -> Option<Arc<dyn LocationProvider>> {
        match self {
            Commands::Register { location, .. }
            | Commands::Shops { location, .. }
            | Commands::Hospitals { location, .. } => location.provider(),
            _ => None,
        }
    }
}

fn print_form_error(err: &FormError) {
    match err {
        FormError::Fields(errors) => {
            for field in errors {
                eprintln!("{}: {}", field.param, field.msg);
            }
        }
        other => eprintln!("{}", other),
    }
}

fn render<R: Resource>(view: &BrowserView<'_, R>) {
    if let Some(radius) = view.radius {
        println!("{}", radius);
    }
    if let Some(err) = view.location_error {
        println!("{}", err.user_message());
    }
    if let Some(err) = view.error {
        println!("Error: {}", err);
    }
    if view.empty_state {
        println!("No {} found.", R::PLURAL);
        return;
    }

    println!("Found {} {}", view.results_count, R::PLURAL);
    for card in &view.cards {
        let marker = if card.selected { ">" } else { " " };
        println!("{} [{}] {} - {}", marker, card.id, card.title, card.subtitle);
        if !card.badges.is_empty() {
            println!("      {}", card.badges.join(" | "));
        }
        for detail in &card.details {
            println!("      {}", detail);
        }
    }

    if let Some(map) = &view.map {
        println!(
            "Map centered at {:.4}, {:.4} (zoom {})",
            map.center.latitude, map.center.longitude, map.zoom
        );
    }

    if let Some(detail) = view.detail {
        println!();
        println!("{}", detail.name());
        println!("{}", detail.address());
        if let Some(marker) = view.map.as_ref().and_then(|map| map.marker(detail.id())) {
            println!("Directions: {}", marker.directions_url());
        }
    }
}

async fn browse<R, S>(client: &MediNear, source: &S, radius: u32, select: Option<String>) -> Result<()>
where
    R: Resource,
    S: ResourceSource<R>,
{
    let mut browser = ResourceBrowser::<R>::new(SearchRadius::try_from(radius)?);
    browser.mount(client.geolocator(), source).await;
    if let Some(id) = select {
        if !browser.select(&id) {
            return Err(Error::validation(format!("No {} with id {}", R::SINGULAR, id)));
        }
    }
    render(&browser.view());
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let mut options = ClientOptions::from_env()?;
    if let Some(url) = &cli.api_url {
        options = options.with_api_url(url);
    }
    let session_file = cli
        .session_file
        .clone()
        .or_else(|| options.session_file.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_FILE));
    options = options.with_session_file(session_file.clone());

    let client = MediNear::with_parts(
        options,
        Arc::new(FileStorage::new(session_file)),
        Arc::new(History::new()),
        cli.command.provider(),
    )?;

    match cli.command {
        Commands::Register {
            name,
            email,
            password,
            confirm_password,
            phone,
            address,
            role,
            ..
        } => {
            let mut form = RegisterForm {
                name,
                email,
                confirm_password: confirm_password.unwrap_or_else(|| password.clone()),
                password,
                phone,
                address,
                role,
                location: None,
            };
            if client.geolocator().is_supported() {
                println!("{}", form.capture_location(client.geolocator()).await);
            }
            match client.auth().register(&form).await {
                Ok(user) => println!("Registered {} ({})", user.name, user.role.as_str()),
                Err(err) => {
                    print_form_error(&err);
                    process::exit(1);
                }
            }
        }
        Commands::Login { email, password } => {
            match client.auth().login(&LoginCredentials::new(email, password)).await {
                Ok(user) => println!("Welcome back, {}!", user.name),
                Err(err) => {
                    print_form_error(&err);
                    process::exit(1);
                }
            }
        }
        Commands::Logout => {
            client.auth().logout()?;
            println!("Logged out");
        }
        Commands::Me => {
            let user = client.auth().me().await?;
            println!("{} <{}>", user.name, user.email);
            println!("Role: {}", user.role.as_str());
            if let Some(phone) = user.phone {
                println!("Phone: {}", phone);
            }
            if let Some(address) = user.address {
                println!("Address: {}", address);
            }
        }
        Commands::Shops { radius, select, .. } => {
            browse::<MedicalShop, _>(&client, &client.medical_shops(), radius, select).await?;
        }
        Commands::Hospitals { radius, select, .. } => {
            browse::<Hospital, _>(&client, &client.hospitals(), radius, select).await?;
        }
        Commands::MyResource => {
            let role = client.session().role().ok_or(Error::Unauthorized)?;
            let mut dashboard = OwnerDashboard::new(role);
            dashboard.load(&client).await;
            match dashboard.state() {
                OwnerState::Loaded(OwnedResource::Shop(shop)) => {
                    println!("{} - {}", shop.name, shop.address);
                    for medicine in &shop.medicines {
                        println!("  {} ({:.2}) stock {}", medicine.name, medicine.price, medicine.stock);
                    }
                }
                OwnerState::Loaded(OwnedResource::Hospital(hospital)) => {
                    println!("{} - {}", hospital.name, hospital.address);
                    println!(
                        "  {} doctors, {} tests, {} services",
                        hospital.doctors.len(),
                        hospital.tests.len(),
                        hospital.services.len()
                    );
                }
                OwnerState::NotCreated(_) => {
                    println!("{}", dashboard.not_created_message().unwrap_or_default());
                }
                OwnerState::NotOwner => println!("This account does not own a shop or hospital."),
                OwnerState::Failed(message) => return Err(Error::general(message)),
                OwnerState::Idle => {}
            }
        }
        Commands::AddMedicine {
            name,
            price,
            stock,
            description,
            manufacturer,
        } => {
            let mut dashboard = OwnerDashboard::new(Role::MedicalShopOwner);
            dashboard.load(&client).await;
            let mut editor = dashboard
                .medicine_editor()
                .ok_or_else(|| Error::general("No medical shop to add to"))?;

            let draft = MedicineDraft {
                name,
                description,
                price,
                stock,
                manufacturer,
            };
            let command = editor.add(&draft)?;
            if let Err(err) = dashboard.commit(&mut editor, client.api(), &command).await {
                return Err(Error::general(err.banner(&command.failure_message())));
            }
            println!("{} medicines on file", editor.items().len());
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    env_logger::builder()
        .filter_level(if cli.debug {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init();

    if let Err(err) = run(cli).await {
        eprintln!("{}", err);
        process::exit(1);
    }
}
