fn main() {
    quatern::cli::run();
}
