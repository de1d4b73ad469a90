//! Session walkthrough: login attempts, subscriptions, and logout

use valise::{use_session, Scope, SessionStore};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    println!("=== Session Store Walkthrough ===\n");

    println!("1. Creating the session store");
    let session = SessionStore::default();

    // Log every session transition
    let _guard = session.subscribe(|state| {
        println!(
            "   [Session] authenticated: {}, user: {}",
            state.is_authenticated,
            state
                .identity
                .as_ref()
                .map(|identity| identity.name.as_str())
                .unwrap_or("-")
        );
    });

    println!("\n2. Logging in with a wrong password");
    match session.login("sajesh@example.com", "nope") {
        Ok(()) => println!("   unexpected success"),
        Err(err) => println!("   rejected: {err}"),
    }

    println!("\n3. Logging in with the demo credentials");
    session
        .login("sajesh@example.com", "ggez")
        .expect("demo credentials are accepted");

    println!("\n4. Sharing the store through a scope");
    let scope = Scope::new();
    scope.provide(session.clone());
    scope.enter(|| {
        let resolved = use_session().expect("session provided");
        let state = resolved.session();
        println!(
            "   resolved inside the scope, avatar: {}",
            state
                .identity
                .map(|identity| identity.avatar_url)
                .unwrap_or_default()
        );
    });

    println!("\n5. Logging out");
    session.logout();

    println!("\n✓ Session walkthrough complete!");
}
