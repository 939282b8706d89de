pub fn run() {
    let langs = scribe_langs::all();
    println!("Supported languages ({}):", langs.len());
    for lang in langs {
        println!("  {:<8} .{}", lang.name(), lang.extensions().join(" ."));
    }
}
