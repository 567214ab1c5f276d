use super::*;

fn customer(id: i64, gender: Gender, image: Option<&str>) -> Customer {
    Customer {
        id,
        name: "Sam".to_owned(),
        email: "sam@example.com".to_owned(),
        age: 41,
        gender,
        roles: Vec::new(),
        username: "sam@example.com".to_owned(),
        profile_image_id: image.map(str::to_owned),
    }
}

#[test]
fn summary_line_shows_age_and_gender() {
    assert_eq!(age_gender_line(&customer(1, Gender::Male, None)), "Age 41 | MALE");
}

#[test]
fn uploaded_image_wins() {
    let url = "http://api.test/api/v1/customers/3/profile-image";
    assert_eq!(avatar_url(&customer(3, Gender::Female, Some("abc")), url), url);
}

#[test]
fn stock_portrait_follows_gender_and_id() {
    assert_eq!(
        avatar_url(&customer(142, Gender::Female, None), "unused"),
        "https://randomuser.me/api/portraits/women/42.jpg"
    );
    assert_eq!(
        avatar_url(&customer(5, Gender::Male, None), "unused"),
        "https://randomuser.me/api/portraits/men/5.jpg"
    );
}
