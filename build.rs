fn main() {
    // Linker arguments for the ESP-IDF demo binary. Host builds of the library skip this.
    #[cfg(feature = "esp-idf")]
    embuild::espidf::sysenv::output();
}
