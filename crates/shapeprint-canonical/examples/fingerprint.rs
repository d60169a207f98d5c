use shapeprint_canonical::{
    compute_shape_digest, regenerate, Canonicalizer, ContextKey, Descriptor, Scope,
};

fn main() {
    let user = Descriptor::object([
        ("id", Descriptor::string().branded("UserId", true)),
        ("email", Descriptor::string().branded("Email", false)),
        ("roles", Descriptor::array(Descriptor::enumeration(["admin", "member"]))),
    ]);

    let tenant_key = ContextKey::parse("$$.tenant").expect("valid context key");
    let scoped = Descriptor::scope_boundary(
        user.clone(),
        Scope::new("Tenant").with_input(tenant_key, Descriptor::string()),
    );

    let canonicalizer = Canonicalizer::default();
    for (label, tree) in [("user", &user), ("scoped user", &scoped)] {
        match canonicalizer.canonicalize(tree, None) {
            Ok(result) => {
                println!("{label}: {}", result.fingerprint);
                println!("  hygiene: {:?}", result.report.status);
            }
            Err(err) => {
                eprintln!("canonicalization failed: {}", err);
                std::process::exit(1);
            }
        }
    }

    match compute_shape_digest(&user, None, &canonicalizer) {
        Ok(digest) => println!("digest: {}", digest),
        Err(err) => eprintln!("digest failed: {}", err),
    }

    // Brands are not reconstructable, so regeneration reports them.
    match regenerate(&user) {
        Ok(code) => println!("{code}"),
        Err(err) => println!("regenerate: {}", err),
    }
}
