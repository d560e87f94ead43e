
mod templates {
    rustemplate::directory!("templates/", html_quote = true);
    rustemplate::file!("single/button.tmpl");
    rustemplate::str!(r#"
%% template hello_first_last(firstname: &str, lastname: &str)
<p>Hello <%= firstname %> <%= lastname %></p>
%% endtemplate
"#);
}

fn main() {
    let items = [(1, "Write <docs>", false), (2, "Ship", true)];

    let body = templates::todo_list(&items) + &templates::todo_summary(&items);
    println!("{}", templates::page("Todo", &body));

    println!("{}", templates::button(42, "My Todo"));

    println!("{}", templates::hello_first_last("King", "Tubby"));
}
