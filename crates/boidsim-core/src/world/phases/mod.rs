mod forces;
mod integrate;
