//! Line-oriented shell over the catalog client.
//!
//! Each command maps onto one use case. The shell keeps a current path the
//! same way a browser would, so redirects to login carry a meaningful
//! destination.

use std::str::FromStr;
use std::sync::{Arc, Mutex};

use holocron_application::{
    ApplicationError, AuthEndpoints, AuthGateway, CatalogEndpoints, FavouriteChange,
    FavouritesStore, GetPerson, HttpTransport, ListFavouritePeople, ListPeople, Login, Logout,
    RequireSession, ToggleFavourite, TokenStore,
};
use holocron_domain::{EntityId, LoginCredentials, LoginRedirect};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::navigator::ShellNavigator;

const HELP: &str = "\
commands:
  login <email> <password>   sign in
  logout                     sign out and forget favourites
  whoami                     show the signed-in user
  people [page]              list a page of characters
  person <id>                show one character
  fav <id>                   add or remove a favourite (sign-in required)
  favs                       list favourites (sign-in required)
  help                       show this help
  quit                       exit";

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `login <email> <password>`
    Login(LoginCredentials),
    /// `logout`
    Logout,
    /// `whoami`
    WhoAmI,
    /// `people [page]`
    People(u32),
    /// `person <id>`
    Person(EntityId),
    /// `fav <id>`
    ToggleFavourite(EntityId),
    /// `favs`
    Favourites,
    /// `help`
    Help,
    /// `quit`
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().unwrap_or_default();
        let args: Vec<&str> = words.collect();

        let id = |args: &[&str]| -> Result<EntityId, String> {
            match args {
                [id] => EntityId::new(*id).map_err(|e| e.to_string()),
                _ => Err(format!("usage: {name} <id>")),
            }
        };

        match (name, args.as_slice()) {
            ("login", [email, password]) => {
                Ok(Self::Login(LoginCredentials::new(*email, *password)))
            }
            ("login", _) => Err("usage: login <email> <password>".to_string()),
            ("logout", []) => Ok(Self::Logout),
            ("whoami", []) => Ok(Self::WhoAmI),
            ("people", []) => Ok(Self::People(1)),
            ("people", [page]) => page
                .parse::<u32>()
                .ok()
                .filter(|page| *page > 0)
                .map(Self::People)
                .ok_or_else(|| format!("invalid page: {page}")),
            ("person", rest) => id(rest).map(Self::Person),
            ("fav", rest) => id(rest).map(Self::ToggleFavourite),
            ("favs", []) => Ok(Self::Favourites),
            ("help", []) => Ok(Self::Help),
            ("quit" | "exit", []) => Ok(Self::Quit),
            ("", _) => Err(String::new()),
            _ => Err(format!("unknown command: {line} (try `help`)")),
        }
    }
}

/// Wires the stores, gateway and use cases together.
pub struct Shell {
    tokens: TokenStore,
    favourites: FavouritesStore,
    navigator: Arc<ShellNavigator>,
    return_to: Mutex<Option<String>>,
    login: Login,
    logout: Logout,
    people: ListPeople,
    person: GetPerson,
    favourite_people: ListFavouritePeople,
    toggle: ToggleFavourite,
    guard: RequireSession,
}

impl Shell {
    /// Builds a shell with empty session state.
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        auth: AuthEndpoints,
        catalog: CatalogEndpoints,
    ) -> Self {
        let tokens = TokenStore::new();
        let favourites = FavouritesStore::new();
        let navigator = Arc::new(ShellNavigator::default());

        let gateway = Arc::new(AuthGateway::new(
            transport.clone(),
            tokens.clone(),
            navigator.clone(),
            auth.clone(),
        ));

        Self {
            login: Login::new(transport.clone(), tokens.clone(), auth.clone()),
            logout: Logout::new(transport, tokens.clone(), favourites.clone(), auth),
            people: ListPeople::new(gateway.clone(), catalog.clone()),
            person: GetPerson::new(gateway.clone(), catalog.clone()),
            favourite_people: ListFavouritePeople::new(
                ListPeople::new(gateway, catalog),
                favourites.clone(),
            ),
            toggle: ToggleFavourite::new(tokens.clone(), favourites.clone()),
            guard: RequireSession::new(tokens.clone()),
            tokens,
            favourites,
            navigator,
            return_to: Mutex::new(None),
        }
    }

    /// Reads commands until `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if reading input or writing output fails.
    pub async fn run<R, W>(&self, input: R, mut output: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        output.write_all(b"holocron> ").await?;
        output.flush().await?;

        while let Some(line) = lines.next_line().await? {
            match line.parse::<Command>() {
                Ok(Command::Quit) => break,
                Ok(command) => {
                    let reply = self.execute(command).await;
                    output.write_all(reply.as_bytes()).await?;
                    output.write_all(b"\n").await?;
                }
                Err(message) if message.is_empty() => {}
                Err(message) => {
                    output.write_all(message.as_bytes()).await?;
                    output.write_all(b"\n").await?;
                }
            }
            output.write_all(b"holocron> ").await?;
            output.flush().await?;
        }
        Ok(())
    }

    /// Runs one command and renders its result.
    pub async fn execute(&self, command: Command) -> String {
        let mut lines = match command {
            Command::Login(credentials) => self.sign_in(&credentials).await,
            Command::Logout => {
                self.logout.execute().await;
                self.navigator.go_to("/");
                vec!["Signed out.".to_string()]
            }
            Command::WhoAmI => vec![self.tokens.user().await.map_or_else(
                || "Not signed in.".to_string(),
                |user| format!("{} <{}>", user.name, user.email),
            )],
            Command::People(page) => {
                self.navigator.go_to("/");
                self.list_people(page).await
            }
            Command::Person(id) => {
                self.navigator.go_to(format!("/people/{id}"));
                self.show_person(&id).await
            }
            Command::ToggleFavourite(id) => self.toggle_favourite(id).await,
            Command::Favourites => {
                self.navigator.go_to("/favourites");
                self.list_favourites().await
            }
            Command::Help => vec![HELP.to_string()],
            Command::Quit => Vec::new(),
        };

        if let Some(redirect) = self.navigator.take_redirect() {
            lines.extend(self.follow_redirect(&redirect));
        }
        lines.join("\n")
    }

    fn follow_redirect(&self, redirect: &LoginRedirect) -> Vec<String> {
        if let Ok(mut return_to) = self.return_to.lock() {
            *return_to = Some(redirect.next.clone());
        }
        self.navigator.go_to(redirect.to_string());

        let mut lines = Vec::new();
        if let Some(notice) = redirect.notice() {
            lines.push(notice.to_string());
        }
        lines.push(format!("Sign in to continue ({redirect})."));
        lines
    }

    async fn sign_in(&self, credentials: &LoginCredentials) -> Vec<String> {
        if let Err(errors) = credentials.validate() {
            return vec![errors.to_string()];
        }
        match self.login.execute(credentials).await {
            Ok(user) => {
                let mut lines = vec![format!("Signed in as {}.", user.name)];
                let next = self.return_to.lock().ok().and_then(|mut r| r.take());
                if let Some(next) = next {
                    lines.push(format!("Returning to {next}."));
                    self.navigator.go_to(next);
                }
                lines
            }
            Err(e) => vec![describe_error(&e)],
        }
    }

    async fn list_people(&self, page: u32) -> Vec<String> {
        match self.people.execute(page).await {
            Ok(listing) => {
                let mut lines = vec![format!("Page {page} of {}", listing.total_pages())];
                for (seed, person) in listing.entries(page) {
                    let id = person.id().map(|id| id.to_string()).unwrap_or_default();
                    let marker = if self.is_favourite(person.id().ok()).await {
                        "★"
                    } else {
                        " "
                    };
                    lines.push(format!("{marker} {id:>3}  {} (portrait {seed})", person.name));
                }
                let mut nav = Vec::new();
                if listing.has_previous() {
                    nav.push(format!("previous: people {}", page - 1));
                }
                if listing.has_next() {
                    nav.push(format!("next: people {}", page + 1));
                }
                if !nav.is_empty() {
                    lines.push(nav.join(" | "));
                }
                lines
            }
            Err(e) => vec![describe_error(&e)],
        }
    }

    async fn show_person(&self, id: &EntityId) -> Vec<String> {
        match self.person.execute(id).await {
            Ok(person) => {
                let favourite = self.favourites.contains(id).await;
                vec![
                    person.name.clone(),
                    format!("  Height:     {}", person.height_display()),
                    format!("  Mass:       {}", person.mass_display()),
                    format!("  Birth Year: {}", person.birth_year),
                    format!("  Films:      {}", person.film_count()),
                    format!("  Date Added: {}", person.created_display()),
                    if favourite {
                        "  ★ favourite (`fav {id}` to remove)".to_string()
                    } else {
                        format!("  ☆ not a favourite (`fav {id}` to add)")
                    },
                ]
            }
            Err(e) => vec![describe_error(&e)],
        }
    }

    async fn toggle_favourite(&self, id: EntityId) -> Vec<String> {
        let path = format!("/people/{id}");
        self.navigator.go_to(path.clone());
        match self.toggle.execute(id.clone(), &path).await {
            Ok(FavouriteChange::Added) => vec![format!("Added {id} to favourites.")],
            Ok(FavouriteChange::Removed) => vec![format!("Removed {id} from favourites.")],
            Err(redirect) => {
                self.navigator.remember(redirect);
                Vec::new()
            }
        }
    }

    async fn list_favourites(&self) -> Vec<String> {
        if let Err(redirect) = self.guard.execute("/favourites").await {
            self.navigator.remember(redirect);
            return Vec::new();
        }
        match self.favourite_people.execute().await {
            Ok(people) if people.is_empty() => {
                vec!["You haven't added any favourites yet. Try `people`.".to_string()]
            }
            Ok(people) => people
                .iter()
                .map(|person| {
                    let id = person.id().map(|id| id.to_string()).unwrap_or_default();
                    format!("★ {id:>3}  {}", person.name)
                })
                .collect(),
            Err(e) => vec![describe_error(&e)],
        }
    }

    async fn is_favourite(&self, id: Option<EntityId>) -> bool {
        match id {
            Some(id) => self.favourites.contains(&id).await,
            None => false,
        }
    }
}

/// User-facing text for a failed command.
fn describe_error(error: &ApplicationError) -> String {
    match error {
        ApplicationError::InvalidCredentials { message } => message.clone(),
        ApplicationError::NotFound(what) => format!("Not found: {what}."),
        ApplicationError::Unauthorized { .. } => "You need to sign in again.".to_string(),
        ApplicationError::Http { message, .. } => format!("{message} (retry the command)"),
        other => format!("Error: {other} (retry the command)"),
    }
}
