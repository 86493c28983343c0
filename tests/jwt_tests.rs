use lecturehub_backend::util::jwt::*;
use lecturehub_backend::config::JwtConfig;
use chrono::Utc;

// Helper function to create JWT utils for testing
fn create_test_jwt_utils() -> JwtTokenUtilsImpl {
    JwtTokenUtilsImpl::new(JwtConfig::default())
}

// Test admin data
struct TestAdmin {
    id: String,
    email: String,
    role: String,
}

impl TestAdmin {
    fn new_admin() -> Self {
        Self {
            id: "65f1c0ffee0000000000abcd".to_string(),
            email: "admin@example.com".to_string(),
            role: "admin".to_string(),
        }
    }

    fn new_superadmin() -> Self {
        Self {
            id: "65f1c0ffee0000000000beef".to_string(),
            email: "root@example.com".to_string(),
            role: "superadmin".to_string(),
        }
    }
}

#[test]
fn test_generate_access_token_success() {
    let jwt_utils = create_test_jwt_utils();
    let admin = TestAdmin::new_admin();

    let issued = jwt_utils.generate_access_token(&admin.id, &admin.email, &admin.role).unwrap();
    assert!(!issued.token.is_empty());
    assert_eq!(issued.token_type, "Bearer");
    assert_eq!(issued.expires_in, 60 * 60);

    let claims = jwt_utils.validate_access_token(&issued.token).unwrap();
    assert_eq!(claims.sub, admin.id);
    assert_eq!(claims.email, admin.email);
    assert_eq!(claims.role, admin.role);
}

#[test]
fn test_superadmin_role_round_trips() {
    let jwt_utils = create_test_jwt_utils();
    let admin = TestAdmin::new_superadmin();
    let issued = jwt_utils.generate_access_token(&admin.id, &admin.email, &admin.role).unwrap();
    assert_eq!(jwt_utils.validate_access_token(&issued.token).unwrap().role, "superadmin");
}

#[test]
fn test_validate_token_with_invalid_secret() {
    let issuer = JwtTokenUtilsImpl::new(JwtConfig {
        jwt_secret: "first_secret_that_is_long_enough_for_hs256".to_string(),
        access_token_expiration: 60,
    });
    let verifier = JwtTokenUtilsImpl::new(JwtConfig {
        jwt_secret: "second_secret_that_is_long_enough_for_hs256".to_string(),
        access_token_expiration: 60,
    });
    let admin = TestAdmin::new_admin();

    let issued = issuer.generate_access_token(&admin.id, &admin.email, &admin.role).unwrap();
    assert!(matches!(
        verifier.validate_access_token(&issued.token),
        Err(JwtError::DecodingFailed(_))
    ));
}

#[test]
fn test_expired_token_is_rejected() {
    let jwt_utils = JwtTokenUtilsImpl::new(JwtConfig {
        access_token_expiration: -5,
        ..JwtConfig::default()
    });
    let admin = TestAdmin::new_admin();
    let issued = jwt_utils.generate_access_token(&admin.id, &admin.email, &admin.role).unwrap();

    assert!(matches!(jwt_utils.validate_access_token(&issued.token), Err(JwtError::TokenExpired)));
}

#[test]
fn test_validate_malformed_token() {
    let jwt_utils = create_test_jwt_utils();
    for token in ["", "abc", "a.b.c", "eyJhbGciOiJIUzI1NiJ9.e30.invalid"] {
        assert!(jwt_utils.validate_access_token(token).is_err(), "accepted {:?}", token);
    }
}

#[test]
fn test_extract_token_from_header_success() {
    let jwt_utils = create_test_jwt_utils();
    assert_eq!(jwt_utils.extract_token_from_header("Bearer abc.def.ghi").unwrap(), "abc.def.ghi");
    assert_eq!(jwt_utils.extract_token_from_header("Bearer   abc.def.ghi  ").unwrap(), "abc.def.ghi");
}

#[test]
fn test_extract_token_from_header_invalid_format() {
    let jwt_utils = create_test_jwt_utils();
    for header in ["abc.def.ghi", "Basic dXNlcjpwdw==", "bearer abc", "Bearer ", "Bearer    "] {
        assert!(
            matches!(jwt_utils.extract_token_from_header(header), Err(JwtError::InvalidToken)),
            "accepted {:?}",
            header
        );
    }
}

#[test]
fn test_token_contains_unique_jti() {
    let jwt_utils = create_test_jwt_utils();
    let admin = TestAdmin::new_admin();
    let first = jwt_utils.generate_access_token(&admin.id, &admin.email, &admin.role).unwrap();
    let second = jwt_utils.generate_access_token(&admin.id, &admin.email, &admin.role).unwrap();

    let first = jwt_utils.validate_access_token(&first.token).unwrap();
    let second = jwt_utils.validate_access_token(&second.token).unwrap();
    assert!(!first.jti.is_empty());
    assert_ne!(first.jti, second.jti);
}

#[test]
fn test_token_timestamps() {
    let jwt_utils = create_test_jwt_utils();
    let admin = TestAdmin::new_admin();
    let before = Utc::now().timestamp();
    let issued = jwt_utils.generate_access_token(&admin.id, &admin.email, &admin.role).unwrap();
    let after = Utc::now().timestamp();

    let claims = jwt_utils.validate_access_token(&issued.token).unwrap();
    assert!(claims.iat >= before && claims.iat <= after);
    assert_eq!(claims.exp - claims.iat, 60 * 60);
}

#[test]
fn test_claims_serialization() {
    let claims = Claims {
        sub: "id".to_string(),
        email: "a@x.com".to_string(),
        role: "admin".to_string(),
        iat: 1,
        exp: 2,
        jti: "jti".to_string(),
    };
    let value = serde_json::to_value(&claims).unwrap();
    assert_eq!(value["email"], "a@x.com");
    assert_eq!(value["exp"], 2);

    let back: Claims = serde_json::from_value(value).unwrap();
    assert_eq!(back.sub, "id");
}

#[test]
fn test_jwt_error_display() {
    assert_eq!(JwtError::TokenExpired.to_string(), "Token has expired");
    assert_eq!(JwtError::InvalidToken.to_string(), "Invalid token format");
    assert_eq!(
        JwtError::DecodingFailed("bad".to_string()).to_string(),
        "Failed to decode JWT token: bad"
    );
}
