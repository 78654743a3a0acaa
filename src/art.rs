// Frame art for the intro and popup reels, plus page ornaments.

/// The resting frame shown until the first press.
pub const STATIC_ROSE: &str = r#"
         *
        .-.
       (@@@)
        `|'
         |
        \|/
         |
     ~~~~~~~~~
"#;

/// The blooming sequence played after the first press.
pub const BLOOM_FRAMES: [&str; 8] = [
    r#"
         _
        (@)
         |
         |
        \|/
         |
         |
     ~~~~~~~~~
"#,
    r#"
        .-.
       (@@@)
        `|'
         |
        \|/
         |
         |
     ~~~~~~~~~
"#,
    r#"
        ,-.
       ( @ )
       \\|//
        `|'
         |
        \|/
         |
     ~~~~~~~~~
"#,
    r#"
       _/`\_
      ( @@@ )
       \\|//
        `|'
         |
        \|/
         |
     ~~~~~~~~~
"#,
    r#"
      .-~^~-.
     ( (@@@) )
      `\\|//'
        `|'
         |
        \|/
         |
     ~~~~~~~~~
"#,
    r#"
     .~*"*"*~.
    ( ( @@@ ) )
     `~\\|//~'
        `|'
         |
        \|/
         |
     ~~~~~~~~~
"#,
    r#"
    @~*%&%*~@
   (@( &@& )@)
    `~\\|//~'
        `|'
         |
       \\|//
         |
     ~~~~~~~~~
"#,
    r#"
  * @~*%&%*~@ .
   (@( &@& )@)
    `~\\|//~' *
        `|'
      .  |
       \\|//
         | *
     ~~~~~~~~~
"#,
];

/// Lantern shimmer looped inside the RSVP popup.
pub const GALA_FRAMES: [&str; 4] = [
    r#"
 .--.   .--.   .--.
 |()|   |  |   |()|
 '--'   '--'   '--'
   *      .      *
"#,
    r#"
 .--.   .--.   .--.
 |  |   |()|   |  |
 '--'   '--'   '--'
   .      *      .
"#,
    r#"
 .--.   .--.   .--.
 |()|   |()|   |  |
 '--'   '--'   '--'
   .      .      *
"#,
    r#"
 .--.   .--.   .--.
 |  |   |  |   |()|
 '--'   '--'   '--'
   *      *      .
"#,
];

/// Flourish under the card title.
pub const BANNER: &str = ".--~*~--..--~*~--..--~*~--.";

/// Section divider inside the card body.
pub const DIVIDER: &str = "~ * ~ * ~ * ~ * ~ * ~";
